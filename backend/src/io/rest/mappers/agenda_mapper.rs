use shared::{AgendaResponse, Homework as SharedHomework};

use super::{ExamMapper, HomeworkMapper, ScheduleMapper};
use crate::domain::models::Homework;
use crate::domain::Agenda;

pub struct AgendaMapper;

impl AgendaMapper {
    pub fn to_dto(child_id: String, agenda: Agenda) -> AgendaResponse {
        AgendaResponse {
            child_id,
            date: agenda.date.format("%Y-%m-%d").to_string(),
            homework_due_today: homework_dtos(agenda.homework_due_today),
            upcoming_homework: homework_dtos(agenda.upcoming_homework),
            completed_today: homework_dtos(agenda.completed_today),
            overdue_homework: homework_dtos(agenda.overdue_homework),
            upcoming_exams: agenda.upcoming_exams.into_iter().map(ExamMapper::to_dto).collect(),
            todays_schedule: agenda.todays_schedule.into_iter().map(ScheduleMapper::to_dto).collect(),
        }
    }
}

fn homework_dtos(items: Vec<Homework>) -> Vec<SharedHomework> {
    items.into_iter().map(HomeworkMapper::to_dto).collect()
}
