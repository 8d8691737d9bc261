use crate::clients::api_client::{ApiError, SchedulerApi};
use crate::models::persona::{Persona, PersonaDraft};

// Owns the single current persona. Absence is a valid state, not an
// error; only non-404 failures land in `error`.
#[derive(Debug, Default)]
pub struct PersonaStore {
    pub persona: Option<Persona>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl PersonaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fetch(&mut self, api: &dyn SchedulerApi) {
        self.loading = true;
        match api.get_persona().await {
            Ok(persona) => {
                self.persona = Some(persona);
                self.error = None;
            }
            Err(ApiError::NotFound) => {
                self.persona = None;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err);
            }
        }
        self.loading = false;
    }

    // Returns whether the upsert stuck; callers drive their messaging
    // off the boolean. Prior persona is kept on failure.
    pub async fn save(&mut self, api: &dyn SchedulerApi, draft: &PersonaDraft) -> bool {
        self.loading = true;
        let saved = match api.save_persona(draft).await {
            Ok(persona) => {
                self.persona = Some(persona);
                self.error = None;
                true
            }
            Err(err) => {
                self.error = Some(err);
                false
            }
        };
        self.loading = false;
        saved
    }

    // Asks the backend to rewrite the persona from recent schedule
    // history.
    pub async fn refresh_from_history(&mut self, api: &dyn SchedulerApi) -> bool {
        self.loading = true;
        let refreshed = match api.refresh_persona_from_history().await {
            Ok(persona) => {
                self.persona = Some(persona);
                self.error = None;
                true
            }
            Err(err) => {
                self.error = Some(err);
                false
            }
        };
        self.loading = false;
        refreshed
    }
}
