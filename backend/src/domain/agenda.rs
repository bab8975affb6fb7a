//! Dashboard view of one child for a reference day.
//!
//! The bucket functions are pure so the date boundaries can be tested
//! without storage. Each keeps the order of its input.

use chrono::{Days, NaiveDate};
use tracing::info;

use super::access::RecordError;
use super::exam_service::ExamService;
use super::homework_service::HomeworkService;
use super::models::{Exam, Homework, ScheduleEvent, SessionContext};
use super::schedule_service::ScheduleService;

/// How far ahead "upcoming" looks, in days
pub const UPCOMING_WINDOW_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct Agenda {
    pub date: NaiveDate,
    pub homework_due_today: Vec<Homework>,
    pub upcoming_homework: Vec<Homework>,
    pub completed_today: Vec<Homework>,
    pub overdue_homework: Vec<Homework>,
    pub upcoming_exams: Vec<Exam>,
    pub todays_schedule: Vec<ScheduleEvent>,
}

fn window_end(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(UPCOMING_WINDOW_DAYS)).unwrap_or(NaiveDate::MAX)
}

/// Open homework due on `today`
pub fn homework_due_today(homework: &[Homework], today: NaiveDate) -> Vec<Homework> {
    homework
        .iter()
        .filter(|h| !h.completed && h.due_date == today)
        .cloned()
        .collect()
}

/// Open homework due after `today` and within the upcoming window
pub fn upcoming_homework(homework: &[Homework], today: NaiveDate) -> Vec<Homework> {
    let end = window_end(today);
    homework
        .iter()
        .filter(|h| !h.completed && h.due_date > today && h.due_date <= end)
        .cloned()
        .collect()
}

/// Homework ticked off on `today` (UTC)
pub fn completed_today(homework: &[Homework], today: NaiveDate) -> Vec<Homework> {
    homework
        .iter()
        .filter(|h| h.completed && h.completed_at.is_some_and(|at| at.date_naive() == today))
        .cloned()
        .collect()
}

pub fn overdue_homework(homework: &[Homework], today: NaiveDate) -> Vec<Homework> {
    homework
        .iter()
        .filter(|h| !h.completed && h.due_date < today)
        .cloned()
        .collect()
}

/// Exams from `today` through the end of the upcoming window
pub fn upcoming_exams(exams: &[Exam], today: NaiveDate) -> Vec<Exam> {
    let end = window_end(today);
    exams
        .iter()
        .filter(|e| e.exam_date >= today && e.exam_date <= end)
        .cloned()
        .collect()
}

pub fn todays_schedule(events: &[ScheduleEvent], today: NaiveDate) -> Vec<ScheduleEvent> {
    events
        .iter()
        .filter(|e| e.start_time.date() == today)
        .cloned()
        .collect()
}

/// Builds the agenda from the record services, so visibility rules apply
#[derive(Clone)]
pub struct AgendaService {
    homework: HomeworkService,
    exams: ExamService,
    schedules: ScheduleService,
}

impl AgendaService {
    pub fn new(homework: HomeworkService, exams: ExamService, schedules: ScheduleService) -> Self {
        Self {
            homework,
            exams,
            schedules,
        }
    }

    pub async fn agenda(&self, session: &SessionContext, child_id: &str, today: NaiveDate) -> Result<Agenda, RecordError> {
        let homework = self.homework.list_homework(session, child_id).await?;
        let exams = self.exams.list_exams(session, child_id).await?;
        let events = self.schedules.list_events(session, child_id).await?;

        let agenda = Agenda {
            date: today,
            homework_due_today: homework_due_today(&homework, today),
            upcoming_homework: upcoming_homework(&homework, today),
            completed_today: completed_today(&homework, today),
            overdue_homework: overdue_homework(&homework, today),
            upcoming_exams: upcoming_exams(&exams, today),
            todays_schedule: todays_schedule(&events, today),
        };

        info!(
            "Agenda for child {} on {}: {} due, {} upcoming, {} exams",
            child_id,
            today,
            agenda.homework_due_today.len(),
            agenda.upcoming_homework.len(),
            agenda.upcoming_exams.len()
        );
        Ok(agenda)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::ChildAccess;
    use crate::domain::commands::homework::CreateHomeworkCommand;
    use crate::domain::models::ExamType;
    use crate::storage::repositories::child_repository::insert_test_child;
    use crate::storage::{
        ChildUserLinkRepository, DbConnection, ExamRepository, HomeworkRepository, ParentChildRepository,
        ScheduleRepository, SubjectRepository,
    };
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    fn homework(title: &str, due: NaiveDate) -> Homework {
        let now = Utc::now();
        Homework {
            id: Homework::generate_id(),
            child_id: "child-1".to_string(),
            subject_id: None,
            title: title.to_string(),
            description: None,
            due_date: due,
            completed: false,
            completed_at: None,
            created_by: None,
            created_at: now,
            updated_at: now,
            subject: None,
        }
    }

    fn exam(title: &str, date: NaiveDate) -> Exam {
        let now = Utc::now();
        Exam {
            id: Exam::generate_id(),
            child_id: "child-1".to_string(),
            subject_id: None,
            title: title.to_string(),
            description: None,
            exam_type: ExamType::Test,
            exam_date: date,
            grade: None,
            created_by: None,
            created_at: now,
            updated_at: now,
            subject: None,
        }
    }

    fn titles(items: &[Homework]) -> Vec<&str> {
        items.iter().map(|h| h.title.as_str()).collect()
    }

    #[test]
    fn test_homework_buckets_at_boundaries() {
        let today = day(10);
        let mut done_today = homework("done today", day(10));
        done_today.set_completed(true, Utc.with_ymd_and_hms(2024, 9, 10, 23, 59, 0).unwrap());
        let mut done_yesterday = homework("done yesterday", day(12));
        done_yesterday.set_completed(true, Utc.with_ymd_and_hms(2024, 9, 9, 23, 59, 0).unwrap());

        let all = vec![
            homework("yesterday", day(9)),
            homework("today", day(10)),
            homework("tomorrow", day(11)),
            homework("in seven days", day(17)),
            homework("in eight days", day(18)),
            done_today,
            done_yesterday,
        ];

        assert_eq!(titles(&homework_due_today(&all, today)), vec!["today"]);
        assert_eq!(titles(&upcoming_homework(&all, today)), vec!["tomorrow", "in seven days"]);
        assert_eq!(titles(&completed_today(&all, today)), vec!["done today"]);
        assert_eq!(titles(&overdue_homework(&all, today)), vec!["yesterday"]);
    }

    #[test]
    fn test_exam_window_includes_today_and_seventh_day() {
        let exams = vec![
            exam("last week", day(3)),
            exam("today", day(10)),
            exam("next week", day(17)),
            exam("later", day(18)),
        ];
        let upcoming = upcoming_exams(&exams, day(10));
        let upcoming: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(upcoming, vec!["today", "next week"]);
    }

    #[test]
    fn test_schedule_for_today_only() {
        let now = Utc::now();
        let event = |title: &str, start: NaiveDate, hour: u32| ScheduleEvent {
            id: ScheduleEvent::generate_id(),
            child_id: "child-1".to_string(),
            title: title.to_string(),
            description: None,
            start_time: start.and_hms_opt(hour, 0, 0).unwrap(),
            end_time: None,
            all_day: false,
            created_by: None,
            created_at: now,
            updated_at: now,
        };
        let events = vec![event("late night", day(9), 23), event("morning", day(10), 0), event("tomorrow", day(11), 0)];
        let today = todays_schedule(&events, day(10));
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].title, "morning");
    }

    #[test]
    fn test_window_saturates_at_max_date() {
        assert_eq!(window_end(NaiveDate::MAX), NaiveDate::MAX);
    }

    #[tokio::test]
    async fn test_agenda_requires_visibility() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let child_id = insert_test_child(&db, "Ana").await;
        let access = ChildAccess::new(
            Arc::new(ParentChildRepository::new(db.clone())),
            Arc::new(ChildUserLinkRepository::new(db.clone())),
        );
        let subjects = Arc::new(SubjectRepository::new(db.clone()));
        let homework = HomeworkService::new(Arc::new(HomeworkRepository::new(db.clone())), subjects.clone(), access.clone());
        let service = AgendaService::new(
            homework.clone(),
            ExamService::new(Arc::new(ExamRepository::new(db.clone())), subjects, access.clone()),
            ScheduleService::new(Arc::new(ScheduleRepository::new(db)), access),
        );

        let parent = SessionContext::parent("parent-1");
        homework
            .create_homework(
                &parent,
                CreateHomeworkCommand {
                    child_id: child_id.clone(),
                    subject_id: None,
                    title: "Essay".to_string(),
                    description: None,
                    due_date: "2024-09-11".to_string(),
                },
            )
            .await
            .unwrap();

        let agenda = service.agenda(&parent, &child_id, day(10)).await.unwrap();
        assert_eq!(agenda.date, day(10));
        assert_eq!(agenda.upcoming_homework.len(), 1);
        assert!(agenda.homework_due_today.is_empty());

        assert!(matches!(
            service.agenda(&SessionContext::parent("parent-2"), &child_id, day(10)).await,
            Err(RecordError::ChildNotVisible)
        ));
    }
}
