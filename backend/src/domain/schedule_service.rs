use chrono::{NaiveDateTime, NaiveTime, Utc};
use std::sync::Arc;
use tracing::info;

use super::access::{
    optional_text, parse_date_time, required_text, ChildAccess, RecordError, MAX_DESCRIPTION_LENGTH,
    MAX_TITLE_LENGTH,
};
use super::commands::schedule::{CreateScheduleCommand, UpdateScheduleCommand};
use super::models::{ScheduleEvent, SessionContext};
use crate::storage::ScheduleStorage;

/// Service for the calendar events of a child
#[derive(Clone)]
pub struct ScheduleService {
    events: Arc<dyn ScheduleStorage>,
    access: ChildAccess,
}

impl ScheduleService {
    pub fn new(events: Arc<dyn ScheduleStorage>, access: ChildAccess) -> Self {
        Self { events, access }
    }

    /// Events of a child ordered by start time
    pub async fn list_events(&self, session: &SessionContext, child_id: &str) -> Result<Vec<ScheduleEvent>, RecordError> {
        self.access.ensure_visible(session, child_id).await?;
        let events = self.events.list_events_for_child(child_id).await?;
        info!("Found {} schedule events for child {}", events.len(), child_id);
        Ok(events)
    }

    pub async fn get_event(&self, session: &SessionContext, event_id: &str) -> Result<ScheduleEvent, RecordError> {
        let event = self.load(event_id).await?;
        self.access.ensure_visible(session, &event.child_id).await?;
        Ok(event)
    }

    pub async fn create_event(
        &self,
        session: &SessionContext,
        command: CreateScheduleCommand,
    ) -> Result<ScheduleEvent, RecordError> {
        self.access.ensure_manageable(session, &command.child_id).await?;
        info!("Creating schedule event: title={}, child={}", command.title, command.child_id);

        let start_time = parse_date_time("Start time", &command.start_time)?;
        let end_time = command
            .end_time
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_date_time("End time", &raw))
            .transpose()?;
        let (start_time, end_time) = check_times(start_time, end_time, command.all_day)?;

        let now = Utc::now();
        let event = ScheduleEvent {
            id: ScheduleEvent::generate_id(),
            title: required_text("Title", &command.title, MAX_TITLE_LENGTH)?,
            description: optional_text("Description", command.description, MAX_DESCRIPTION_LENGTH)?,
            child_id: command.child_id,
            start_time,
            end_time,
            all_day: command.all_day,
            created_by: Some(session.account_id.clone()),
            created_at: now,
            updated_at: now,
        };
        self.events.store_event(&event).await?;

        info!("Created schedule event: {} with ID: {}", event.title, event.id);
        Ok(event)
    }

    pub async fn update_event(
        &self,
        session: &SessionContext,
        event_id: &str,
        command: UpdateScheduleCommand,
    ) -> Result<ScheduleEvent, RecordError> {
        let mut event = self.load(event_id).await?;
        self.access.ensure_manageable(session, &event.child_id).await?;

        if let Some(title) = command.title {
            event.title = required_text("Title", &title, MAX_TITLE_LENGTH)?;
        }
        if let Some(description) = command.description {
            event.description = optional_text("Description", description, MAX_DESCRIPTION_LENGTH)?;
        }

        let start_time = match command.start_time {
            Some(raw) => parse_date_time("Start time", &raw)?,
            None => event.start_time,
        };
        let end_time = match command.end_time {
            Some(raw) => raw
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| parse_date_time("End time", &raw))
                .transpose()?,
            None => event.end_time,
        };
        let all_day = command.all_day.unwrap_or(event.all_day);
        (event.start_time, event.end_time) = check_times(start_time, end_time, all_day)?;
        event.all_day = all_day;
        event.updated_at = Utc::now();

        self.events.update_event(&event).await?;

        info!("Updated schedule event: {}", event.id);
        Ok(event)
    }

    pub async fn delete_event(&self, session: &SessionContext, event_id: &str) -> Result<(), RecordError> {
        let event = self.load(event_id).await?;
        self.access.ensure_manageable(session, &event.child_id).await?;

        if !self.events.delete_event(event_id).await? {
            return Err(RecordError::NotFound("Schedule event", event_id.to_string()));
        }
        info!("Deleted schedule event: {}", event_id);
        Ok(())
    }

    async fn load(&self, event_id: &str) -> Result<ScheduleEvent, RecordError> {
        self.events
            .get_event(event_id)
            .await?
            .ok_or_else(|| RecordError::NotFound("Schedule event", event_id.to_string()))
    }
}

/// All-day events start at midnight and have no end; timed events must not
/// end before they start.
fn check_times(
    start_time: NaiveDateTime,
    end_time: Option<NaiveDateTime>,
    all_day: bool,
) -> Result<(NaiveDateTime, Option<NaiveDateTime>), RecordError> {
    if all_day {
        return Ok((start_time.date().and_time(NaiveTime::MIN), None));
    }
    if let Some(end) = end_time {
        if end < start_time {
            return Err(RecordError::Validation("End time cannot be before start time".to_string()));
        }
    }
    Ok((start_time, end_time))
}
