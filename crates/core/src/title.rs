//! Catalog title model, write payloads, and field validation.
//!
//! [`Title`] is the canonical record held by a catalog store. [`TitleFields`]
//! is the sparse payload carried by change-requests and catalog upserts:
//! every field is optional so the same shape serves edits (only changed
//! fields) and additions (all required fields present).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum number of cast names stored on a title.
pub const MAX_CAST_MEMBERS: usize = 10;

/// Maximum length of a title description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Maximum length of a title name, in characters.
pub const MAX_NAME_CHARS: usize = 200;

// ---------------------------------------------------------------------------
// TitleKind
// ---------------------------------------------------------------------------

/// Whether a title is a film or a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    Movie,
    Tv,
}

impl TitleKind {
    /// Wire / storage name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::Tv => "tv",
        }
    }

    /// Parse a stored kind name.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "movie" => Ok(TitleKind::Movie),
            "tv" => Ok(TitleKind::Tv),
            other => Err(CoreError::Validation(format!(
                "Invalid title kind '{other}'. Must be one of: movie, tv"
            ))),
        }
    }
}

impl std::fmt::Display for TitleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Title
// ---------------------------------------------------------------------------

/// A title record as held by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: DbId,
    pub name: String,
    pub service_id: DbId,
    pub kind: TitleKind,
    pub imdb_id: Option<String>,
    pub year: Option<i32>,
    pub release_date: Option<NaiveDate>,
    pub runtime_minutes: Option<i32>,
    /// Only meaningful for `kind = tv`.
    pub episode_runtime_minutes: Option<i32>,
    /// Only meaningful for `kind = tv`.
    pub episode_count: Option<i32>,
    pub rating: Option<String>,
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    pub description: Option<String>,
}

impl Title {
    /// Overlay the non-`None` fields of `fields` onto this title.
    ///
    /// Switching a title to `movie` clears its episode fields.
    pub fn apply(&mut self, fields: &TitleFields) {
        if let Some(name) = &fields.name {
            self.name = name.trim().to_string();
        }
        if let Some(kind) = fields.kind {
            self.kind = kind;
        }
        if let Some(imdb_id) = &fields.imdb_id {
            self.imdb_id = Some(imdb_id.trim().to_string());
        }
        if fields.year.is_some() {
            self.year = fields.year;
        }
        if fields.release_date.is_some() {
            self.release_date = fields.release_date;
        }
        if fields.runtime_minutes.is_some() {
            self.runtime_minutes = fields.runtime_minutes;
        }
        if fields.episode_runtime_minutes.is_some() {
            self.episode_runtime_minutes = fields.episode_runtime_minutes;
        }
        if fields.episode_count.is_some() {
            self.episode_count = fields.episode_count;
        }
        if fields.rating.is_some() {
            self.rating.clone_from(&fields.rating);
        }
        if fields.director.is_some() {
            self.director.clone_from(&fields.director);
        }
        if let Some(cast) = &fields.cast {
            self.cast.clone_from(cast);
        }
        if fields.description.is_some() {
            self.description.clone_from(&fields.description);
        }
        if self.kind == TitleKind::Movie {
            self.episode_runtime_minutes = None;
            self.episode_count = None;
        }
    }
}

// ---------------------------------------------------------------------------
// TitleFields
// ---------------------------------------------------------------------------

/// Sparse title payload. Absent fields mean "unchanged" on edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct TitleFields {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub kind: Option<TitleKind>,
    #[validate(length(min = 1, max = 16))]
    pub imdb_id: Option<String>,
    #[validate(range(min = 1870, max = 2100))]
    pub year: Option<i32>,
    pub release_date: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub runtime_minutes: Option<i32>,
    #[validate(range(min = 1))]
    pub episode_runtime_minutes: Option<i32>,
    #[validate(range(min = 1))]
    pub episode_count: Option<i32>,
    #[validate(length(max = 16))]
    pub rating: Option<String>,
    #[validate(length(max = 200))]
    pub director: Option<String>,
    #[validate(length(max = 10))]
    pub cast: Option<Vec<String>>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

impl TitleFields {
    /// `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == TitleFields::default()
    }

    /// Overlay the non-`None` fields of `other` onto `self`.
    pub fn merge(&mut self, other: TitleFields) {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.kind.is_some() {
            self.kind = other.kind;
        }
        if other.imdb_id.is_some() {
            self.imdb_id = other.imdb_id;
        }
        if other.year.is_some() {
            self.year = other.year;
        }
        if other.release_date.is_some() {
            self.release_date = other.release_date;
        }
        if other.runtime_minutes.is_some() {
            self.runtime_minutes = other.runtime_minutes;
        }
        if other.episode_runtime_minutes.is_some() {
            self.episode_runtime_minutes = other.episode_runtime_minutes;
        }
        if other.episode_count.is_some() {
            self.episode_count = other.episode_count;
        }
        if other.rating.is_some() {
            self.rating = other.rating;
        }
        if other.director.is_some() {
            self.director = other.director;
        }
        if other.cast.is_some() {
            self.cast = other.cast;
        }
        if other.description.is_some() {
            self.description = other.description;
        }
    }
}

/// Validate a title payload: field bounds, blank strings, and the rule that
/// episode fields are only allowed on TV titles.
///
/// `effective_kind` is the kind the title will have once the payload is
/// applied (the payload's own kind, or the existing title's kind on edits).
pub fn validate_fields(
    fields: &TitleFields,
    effective_kind: Option<TitleKind>,
) -> Result<(), CoreError> {
    fields.validate()?;

    if let Some(name) = &fields.name {
        if name.trim().is_empty() {
            return Err(CoreError::Validation("Title name must not be blank".into()));
        }
    }
    if let Some(imdb_id) = &fields.imdb_id {
        if imdb_id.trim().is_empty() {
            return Err(CoreError::Validation("IMDb id must not be blank".into()));
        }
    }
    if let Some(cast) = &fields.cast {
        if cast.iter().any(|member| member.trim().is_empty()) {
            return Err(CoreError::Validation("Cast names must not be blank".into()));
        }
    }

    let kind = fields.kind.or(effective_kind);
    if kind == Some(TitleKind::Movie)
        && (fields.episode_runtime_minutes.is_some() || fields.episode_count.is_some())
    {
        return Err(CoreError::Validation(
            "Episode count and episode runtime are only allowed for tv titles".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Catalog write shapes
// ---------------------------------------------------------------------------

/// A catalog upsert: insert when `title_id` is `None`, update otherwise.
///
/// `service_id` is required on inserts. On updates it is only set by a move;
/// `None` leaves the title on its current service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleWrite {
    pub title_id: Option<DbId>,
    pub service_id: Option<DbId>,
    pub fields: TitleFields,
}

impl TitleWrite {
    /// Build a new title from an insert payload. Requires name and kind.
    pub fn to_new_title(&self) -> Result<Title, CoreError> {
        let name = self
            .fields
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| CoreError::Validation("A new title requires a name".into()))?;
        let kind = self
            .fields
            .kind
            .ok_or_else(|| CoreError::Validation("A new title requires a kind".into()))?;
        let service_id = self
            .service_id
            .ok_or_else(|| CoreError::Validation("A new title requires a service".into()))?;

        let mut title = Title {
            id: 0,
            name: name.to_string(),
            service_id,
            kind,
            imdb_id: None,
            year: None,
            release_date: None,
            runtime_minutes: None,
            episode_runtime_minutes: None,
            episode_count: None,
            rating: None,
            director: None,
            cast: Vec::new(),
            description: None,
        };
        title.apply(&self.fields);
        Ok(title)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn sample_title(kind: TitleKind) -> Title {
        Title {
            id: 7,
            name: "Sample".into(),
            service_id: 1,
            kind,
            imdb_id: None,
            year: Some(2001),
            release_date: None,
            runtime_minutes: Some(95),
            episode_runtime_minutes: None,
            episode_count: None,
            rating: Some("PG".into()),
            director: None,
            cast: vec![],
            description: None,
        }
    }

    #[test]
    fn test_kind_parse_roundtrips_known_values() {
        assert_eq!(TitleKind::parse("movie").unwrap(), TitleKind::Movie);
        assert_eq!(TitleKind::parse("tv").unwrap(), TitleKind::Tv);
        assert_matches!(TitleKind::parse("anime"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_cast_over_limit_rejected() {
        let fields = TitleFields {
            cast: Some((0..=MAX_CAST_MEMBERS).map(|i| format!("Actor {i}")).collect()),
            ..Default::default()
        };
        assert_matches!(validate_fields(&fields, None), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_cast_at_limit_accepted() {
        let fields = TitleFields {
            cast: Some((0..MAX_CAST_MEMBERS).map(|i| format!("Actor {i}")).collect()),
            ..Default::default()
        };
        assert!(validate_fields(&fields, None).is_ok());
    }

    #[test]
    fn test_description_limit_counts_characters() {
        let at_limit = TitleFields {
            description: Some("é".repeat(MAX_DESCRIPTION_CHARS)),
            ..Default::default()
        };
        assert!(validate_fields(&at_limit, None).is_ok());

        let over = TitleFields {
            description: Some("a".repeat(MAX_DESCRIPTION_CHARS + 1)),
            ..Default::default()
        };
        assert!(validate_fields(&over, None).is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        let fields = TitleFields {
            name: Some("   ".into()),
            ..Default::default()
        };
        let err = validate_fields(&fields, None).unwrap_err();
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn test_episode_fields_rejected_for_movies() {
        let fields = TitleFields {
            kind: Some(TitleKind::Movie),
            episode_count: Some(8),
            ..Default::default()
        };
        assert!(validate_fields(&fields, None).is_err());

        let edit_only = TitleFields {
            episode_runtime_minutes: Some(45),
            ..Default::default()
        };
        assert!(validate_fields(&edit_only, Some(TitleKind::Movie)).is_err());
        assert!(validate_fields(&edit_only, Some(TitleKind::Tv)).is_ok());
    }

    #[test]
    fn test_apply_overlays_only_present_fields() {
        let mut title = sample_title(TitleKind::Movie);
        title.apply(&TitleFields {
            name: Some("  Renamed ".into()),
            year: Some(2004),
            ..Default::default()
        });
        assert_eq!(title.name, "Renamed");
        assert_eq!(title.year, Some(2004));
        assert_eq!(title.rating.as_deref(), Some("PG"));
    }

    #[test]
    fn test_switching_to_movie_clears_episode_fields() {
        let mut title = sample_title(TitleKind::Tv);
        title.episode_count = Some(10);
        title.episode_runtime_minutes = Some(30);
        title.apply(&TitleFields {
            kind: Some(TitleKind::Movie),
            ..Default::default()
        });
        assert_eq!(title.episode_count, None);
        assert_eq!(title.episode_runtime_minutes, None);
    }

    #[test]
    fn test_merge_keeps_existing_when_other_absent() {
        let mut base = TitleFields {
            name: Some("Base".into()),
            year: Some(1999),
            ..Default::default()
        };
        base.merge(TitleFields {
            year: Some(2000),
            ..Default::default()
        });
        assert_eq!(base.name.as_deref(), Some("Base"));
        assert_eq!(base.year, Some(2000));
    }

    #[test]
    fn test_new_title_requires_name_and_kind() {
        let write = TitleWrite {
            title_id: None,
            service_id: Some(3),
            fields: TitleFields {
                name: Some("Only a name".into()),
                ..Default::default()
            },
        };
        assert_matches!(write.to_new_title(), Err(CoreError::Validation(_)));

        let write = TitleWrite {
            fields: TitleFields {
                name: Some("Complete".into()),
                kind: Some(TitleKind::Tv),
                episode_count: Some(6),
                ..Default::default()
            },
            ..write
        };
        let title = write.to_new_title().unwrap();
        assert_eq!(title.service_id, 3);
        assert_eq!(title.episode_count, Some(6));
    }

    #[test]
    fn test_new_title_requires_service() {
        let write = TitleWrite {
            title_id: None,
            service_id: None,
            fields: TitleFields {
                name: Some("Nowhere".into()),
                kind: Some(TitleKind::Movie),
                ..Default::default()
            },
        };
        let err = write.to_new_title().unwrap_err();
        assert!(err.to_string().contains("service"));
    }

    #[test]
    fn test_apply_sets_imdb_id_and_release_date() {
        let mut title = sample_title(TitleKind::Movie);
        let released = NaiveDate::from_ymd_opt(2001, 7, 20).unwrap();
        title.apply(&TitleFields {
            imdb_id: Some(" tt0245429 ".into()),
            release_date: Some(released),
            ..Default::default()
        });
        assert_eq!(title.imdb_id.as_deref(), Some("tt0245429"));
        assert_eq!(title.release_date, Some(released));
        assert_eq!(title.year, Some(2001));
    }

    #[test]
    fn test_release_date_uses_iso_format() {
        let fields: TitleFields = serde_json::from_value(serde_json::json!({
            "imdb_id": "tt0245429",
            "release_date": "2001-07-20"
        }))
        .unwrap();
        assert_eq!(fields.release_date, NaiveDate::from_ymd_opt(2001, 7, 20));

        let blank = TitleFields {
            imdb_id: Some("  ".into()),
            ..Default::default()
        };
        assert_matches!(validate_fields(&blank, None), Err(CoreError::Validation(_)));
    }
}
