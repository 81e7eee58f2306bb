//! FWIP: uniform random title selection and watch-state toggles.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::locator::locator_for;
use crate::title::{Title, TitleKind};
use crate::types::DbId;
use crate::watch::WatchStatePatch;

/// Content-type toggle on the FWIP start menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFilter {
    Movie,
    Tv,
    #[default]
    All,
}

impl ContentFilter {
    pub fn matches(self, kind: TitleKind) -> bool {
        match self {
            ContentFilter::All => true,
            ContentFilter::Movie => kind == TitleKind::Movie,
            ContentFilter::Tv => kind == TitleKind::Tv,
        }
    }
}

/// Active service and content filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FwipFilter {
    pub service_id: Option<DbId>,
    #[serde(default)]
    pub content: ContentFilter,
}

impl FwipFilter {
    pub fn matches(&self, title: &Title) -> bool {
        self.service_id.map_or(true, |id| title.service_id == id)
            && self.content.matches(title.kind)
    }
}

/// Pick one matching title uniformly at random. `None` when nothing matches.
pub fn pick<'a, R: Rng + ?Sized>(
    titles: &'a [Title],
    filter: &FwipFilter,
    rng: &mut R,
) -> Option<&'a Title> {
    let candidates: Vec<&Title> = titles.iter().filter(|t| filter.matches(t)).collect();
    candidates.choose(rng).copied()
}

/// A selected title plus the locator its card is addressed by.
#[derive(Debug, Clone, Serialize)]
pub struct FwipCard {
    pub locator: String,
    pub title: Title,
}

impl FwipCard {
    pub fn new(title: Title) -> Self {
        Self {
            locator: locator_for(title.id),
            title,
        }
    }
}

/// Buttons on a FWIP card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchToggle {
    SeenIt,
    HaventSeenIt,
    Star,
}

impl WatchToggle {
    /// Parse the toggle named in a card action path segment.
    pub fn from_action(action: &str) -> Result<Self, CoreError> {
        match action {
            "seen" => Ok(WatchToggle::SeenIt),
            "unseen" => Ok(WatchToggle::HaventSeenIt),
            "star" => Ok(WatchToggle::Star),
            other => Err(CoreError::Validation(format!(
                "Unknown watch action '{other}'. Must be one of: seen, unseen, star"
            ))),
        }
    }

    pub fn patch(self) -> WatchStatePatch {
        match self {
            WatchToggle::SeenIt => WatchStatePatch {
                watched: Some(true),
                important: None,
            },
            WatchToggle::HaventSeenIt => WatchStatePatch {
                watched: Some(false),
                important: None,
            },
            WatchToggle::Star => WatchStatePatch {
                watched: None,
                important: Some(true),
            },
        }
    }
}
