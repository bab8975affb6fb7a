//! Domain-level command types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod child {
    /// Input for creating a child profile.
    #[derive(Debug, Clone)]
    pub struct CreateChildCommand {
        pub name: String,
        pub birth_date: Option<String>,
        pub grade: Option<String>,
        pub school_name: Option<String>,
        pub avatar_url: Option<String>,
    }

    /// Partial update of a child profile; `None` leaves a field untouched,
    /// an empty string clears an optional field.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateChildCommand {
        pub name: Option<String>,
        pub birth_date: Option<String>,
        pub grade: Option<String>,
        pub school_name: Option<String>,
        pub avatar_url: Option<String>,
    }
}

// In the update commands below an outer `None` leaves a field untouched and
// `Some(None)` clears a nullable field.

pub mod subject {
    #[derive(Debug, Clone)]
    pub struct CreateSubjectCommand {
        pub child_id: String,
        pub name: String,
        pub color: Option<String>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateSubjectCommand {
        pub name: Option<String>,
        pub color: Option<String>,
    }
}

pub mod homework {
    #[derive(Debug, Clone)]
    pub struct CreateHomeworkCommand {
        pub child_id: String,
        pub subject_id: Option<String>,
        pub title: String,
        pub description: Option<String>,
        /// `YYYY-MM-DD`
        pub due_date: String,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateHomeworkCommand {
        pub subject_id: Option<Option<String>>,
        pub title: Option<String>,
        pub description: Option<Option<String>>,
        pub due_date: Option<String>,
    }
}

pub mod exam {
    #[derive(Debug, Clone)]
    pub struct CreateExamCommand {
        pub child_id: String,
        pub subject_id: Option<String>,
        pub title: String,
        pub description: Option<String>,
        /// `prova` or `trabalho`
        pub exam_type: String,
        /// `YYYY-MM-DD`
        pub exam_date: String,
        pub grade: Option<f64>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateExamCommand {
        pub subject_id: Option<Option<String>>,
        pub title: Option<String>,
        pub description: Option<Option<String>>,
        pub exam_type: Option<String>,
        pub exam_date: Option<String>,
        pub grade: Option<Option<f64>>,
    }
}

pub mod schedule {
    #[derive(Debug, Clone)]
    pub struct CreateScheduleCommand {
        pub child_id: String,
        pub title: String,
        pub description: Option<String>,
        /// `YYYY-MM-DDTHH:MM[:SS]`
        pub start_time: String,
        pub end_time: Option<String>,
        pub all_day: bool,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateScheduleCommand {
        pub title: Option<String>,
        pub description: Option<Option<String>>,
        pub start_time: Option<String>,
        pub end_time: Option<Option<String>>,
        pub all_day: Option<bool>,
    }
}

pub mod announcement {
    #[derive(Debug, Clone)]
    pub struct CreateAnnouncementCommand {
        pub child_id: String,
        pub title: String,
        pub content: Option<String>,
        pub important: bool,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateAnnouncementCommand {
        pub title: Option<String>,
        pub content: Option<Option<String>>,
        pub important: Option<bool>,
    }
}
