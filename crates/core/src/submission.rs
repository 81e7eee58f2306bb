//! Submission builder: turns filled-out forms into change-requests.
//!
//! Each dialog (edit, add, move/delete) has a form type. A form is driven by
//! a [`FormSession`] through `Idle -> Filling -> Submitted`. Submitting
//! validates the form with [`validate_new_request`], checks the target title
//! against the catalog with [`check_target`], and enqueues the result.
//! Nothing is enqueued when either check fails.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogStore;
use crate::change_request::{ChangeRequest, NewChangeRequest, SourceKind};
use crate::error::CoreError;
use crate::moderation::ModerationQueue;
use crate::title::{validate_fields, TitleFields};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Fields of the "update an existing title" dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditForm {
    pub target_title_id: Option<DbId>,
    pub service_id: Option<DbId>,
    #[serde(default)]
    pub changes: TitleFields,
}

/// Fields of the "add a new title" dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddForm {
    pub service_id: Option<DbId>,
    #[serde(default)]
    pub title: TitleFields,
}

/// What the move/delete dialog asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalAction {
    Move,
    Delete,
}

/// Fields of the "move or delete a title" dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveDeleteForm {
    pub action: Option<RemovalAction>,
    pub target_title_id: Option<DbId>,
    pub service_id: Option<DbId>,
    /// Where the title is moving to. Required for `move`.
    pub destination_service_id: Option<DbId>,
    /// Why the title is being removed. Required for `delete`.
    pub reason: Option<String>,
}

/// Any submittable form, tagged by dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum SubmissionForm {
    Edit(EditForm),
    Add(AddForm),
    MoveDelete(MoveDeleteForm),
}

/// Behaviour shared by all dialog forms.
pub trait Form: Clone {
    /// An empty form with the service dropdown pre-populated.
    fn for_service(service_id: DbId) -> Self;

    /// Validate and convert into an enqueueable request.
    fn build(&self) -> Result<NewChangeRequest, CoreError>;
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

impl Form for EditForm {
    fn for_service(service_id: DbId) -> Self {
        Self {
            service_id: Some(service_id),
            ..Default::default()
        }
    }

    fn build(&self) -> Result<NewChangeRequest, CoreError> {
        let request = NewChangeRequest {
            source: SourceKind::Edit,
            target_title_id: Some(required(self.target_title_id, "target_title_id")?),
            service_id: required(self.service_id, "service_id")?,
            destination_service_id: None,
            payload: self.changes.clone(),
            reason: None,
        };
        validate_new_request(&request)?;
        Ok(request)
    }
}

impl Form for AddForm {
    fn for_service(service_id: DbId) -> Self {
        Self {
            service_id: Some(service_id),
            ..Default::default()
        }
    }

    fn build(&self) -> Result<NewChangeRequest, CoreError> {
        let request = NewChangeRequest {
            source: SourceKind::Add,
            target_title_id: None,
            service_id: required(self.service_id, "service_id")?,
            destination_service_id: None,
            payload: self.title.clone(),
            reason: None,
        };
        validate_new_request(&request)?;
        Ok(request)
    }
}

impl Form for MoveDeleteForm {
    fn for_service(service_id: DbId) -> Self {
        Self {
            service_id: Some(service_id),
            ..Default::default()
        }
    }

    fn build(&self) -> Result<NewChangeRequest, CoreError> {
        let action = required(self.action, "action")?;
        let source = match action {
            RemovalAction::Move => SourceKind::Move,
            RemovalAction::Delete => SourceKind::Delete,
        };
        let request = NewChangeRequest {
            source,
            target_title_id: Some(required(self.target_title_id, "target_title_id")?),
            service_id: required(self.service_id, "service_id")?,
            destination_service_id: match action {
                RemovalAction::Move => self.destination_service_id,
                RemovalAction::Delete => None,
            },
            payload: TitleFields::default(),
            reason: self.reason.as_deref().map(str::trim).map(String::from),
        };
        validate_new_request(&request)?;
        Ok(request)
    }
}

impl SubmissionForm {
    pub fn build(&self) -> Result<NewChangeRequest, CoreError> {
        match self {
            SubmissionForm::Edit(form) => form.build(),
            SubmissionForm::Add(form) => form.build(),
            SubmissionForm::MoveDelete(form) => form.build(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Required-field rules per source kind. Shared by the submission builder
/// and by the moderation console when an admin edits a pending request.
pub fn validate_new_request(request: &NewChangeRequest) -> Result<(), CoreError> {
    if request.service_id <= 0 {
        return Err(CoreError::Validation("service_id is required".into()));
    }

    match request.source {
        SourceKind::Add => {
            if request.target_title_id.is_some() {
                return Err(CoreError::Validation(
                    "An add request must not target an existing title".into(),
                ));
            }
            let has_name = request
                .payload
                .name
                .as_deref()
                .is_some_and(|n| !n.trim().is_empty());
            if !has_name {
                return Err(CoreError::Validation("Title name is required".into()));
            }
            if request.payload.kind.is_none() {
                return Err(CoreError::Validation(
                    "Title kind is required (movie or tv)".into(),
                ));
            }
        }
        SourceKind::Edit => {
            require_target(request)?;
            if request.payload.is_empty() {
                return Err(CoreError::Validation(
                    "An edit request must change at least one field".into(),
                ));
            }
        }
        SourceKind::Move => {
            require_target(request)?;
            let destination = request.destination_service_id.ok_or_else(|| {
                CoreError::Validation("destination_service_id is required to move a title".into())
            })?;
            if destination == request.service_id {
                return Err(CoreError::Validation(
                    "destination_service_id must differ from service_id".into(),
                ));
            }
        }
        SourceKind::Delete => {
            require_target(request)?;
            let has_reason = request
                .reason
                .as_deref()
                .is_some_and(|r| !r.trim().is_empty());
            if !has_reason {
                return Err(CoreError::Validation(
                    "A reason is required to delete a title".into(),
                ));
            }
        }
    }

    validate_fields(&request.payload, None)
}

fn require_target(request: &NewChangeRequest) -> Result<(), CoreError> {
    match request.target_title_id {
        Some(id) if id > 0 => Ok(()),
        _ => Err(CoreError::Validation("target_title_id is required".into())),
    }
}

/// Rules that need the catalog. The target title must exist, sit on the
/// request's service, and accept the payload for its kind.
pub async fn check_target(
    catalog: &dyn CatalogStore,
    request: &NewChangeRequest,
) -> Result<(), CoreError> {
    let Some(title_id) = request.target_title_id else {
        return Ok(());
    };
    let target = catalog.get_title(title_id).await?.ok_or(CoreError::NotFound {
        entity: "Title",
        id: title_id,
    })?;

    if target.service_id != request.service_id {
        return Err(CoreError::Validation(format!(
            "Title {title_id} is not on service {}",
            request.service_id
        )));
    }
    validate_fields(&request.payload, Some(target.kind))
}

/// Check an already-built request against the catalog and enqueue it.
pub async fn submit_request(
    queue: &dyn ModerationQueue,
    catalog: &dyn CatalogStore,
    request: NewChangeRequest,
) -> Result<ChangeRequest, CoreError> {
    check_target(catalog, &request).await?;
    let stored = queue.enqueue(request).await?;
    tracing::info!(
        request_id = stored.id,
        source = %stored.source,
        service_id = stored.service_id,
        "Change request submitted for moderation"
    );
    Ok(stored)
}

// ---------------------------------------------------------------------------
// Form state machine
// ---------------------------------------------------------------------------

/// Dialog lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState<F> {
    Idle,
    Filling(F),
    Submitted { request_id: DbId },
}

/// Drives one dialog form from opening to submission.
#[derive(Debug, Clone)]
pub struct FormSession<F: Form> {
    state: FormState<F>,
}

impl<F: Form> Default for FormSession<F> {
    fn default() -> Self {
        Self {
            state: FormState::Idle,
        }
    }
}

impl<F: Form> FormSession<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session already in `Filling` with the given form contents.
    pub fn with_form(form: F) -> Self {
        Self {
            state: FormState::Filling(form),
        }
    }

    pub fn state(&self) -> &FormState<F> {
        &self.state
    }

    /// Open the dialog for a service. Re-opening discards previous input.
    pub fn open(&mut self, service_id: DbId) -> &mut F {
        self.state = FormState::Filling(F::for_service(service_id));
        match &mut self.state {
            FormState::Filling(form) => form,
            _ => unreachable!("state was just set to Filling"),
        }
    }

    /// Mutable access to the form while it is being filled.
    pub fn form_mut(&mut self) -> Result<&mut F, CoreError> {
        match &mut self.state {
            FormState::Filling(form) => Ok(form),
            FormState::Idle => Err(CoreError::Conflict("Form is not open".into())),
            FormState::Submitted { .. } => {
                Err(CoreError::Conflict("Form was already submitted".into()))
            }
        }
    }

    /// Close the dialog without submitting.
    pub fn cancel(&mut self) {
        self.state = FormState::Idle;
    }

    /// Validate and enqueue. On any error the session stays in `Filling`.
    pub async fn submit(
        &mut self,
        queue: &dyn ModerationQueue,
        catalog: &dyn CatalogStore,
    ) -> Result<ChangeRequest, CoreError> {
        let request = self.form_mut()?.build()?;
        let stored = submit_request(queue, catalog, request).await?;
        self.state = FormState::Submitted {
            request_id: stored.id,
        };
        Ok(stored)
    }
}
