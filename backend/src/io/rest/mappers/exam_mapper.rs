use shared::{
    CreateExamRequest, Exam as SharedExam, ExamListResponse, ExamResponse, ExamType as SharedExamType,
    UpdateExamRequest,
};

use super::SubjectMapper;
use crate::domain::commands::exam::{CreateExamCommand, UpdateExamCommand};
use crate::domain::models::{Exam as DomainExam, ExamType};

pub struct ExamMapper;

impl ExamMapper {
    pub fn to_dto(domain: DomainExam) -> SharedExam {
        SharedExam {
            id: domain.id,
            child_id: domain.child_id,
            subject_id: domain.subject_id,
            title: domain.title,
            description: domain.description,
            exam_type: match domain.exam_type {
                ExamType::Test => SharedExamType::Test,
                ExamType::Assignment => SharedExamType::Assignment,
            },
            exam_date: domain.exam_date.format("%Y-%m-%d").to_string(),
            grade: domain.grade,
            created_by: domain.created_by,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
            subject: domain.subject.map(SubjectMapper::to_dto),
        }
    }

    pub fn to_create_command(child_id: String, request: CreateExamRequest) -> CreateExamCommand {
        CreateExamCommand {
            child_id,
            subject_id: request.subject_id,
            title: request.title,
            description: request.description,
            exam_type: request.exam_type,
            exam_date: request.exam_date,
            grade: request.grade,
        }
    }

    pub fn to_update_command(request: UpdateExamRequest) -> UpdateExamCommand {
        UpdateExamCommand {
            subject_id: request.subject_id,
            title: request.title,
            description: request.description,
            exam_type: request.exam_type,
            exam_date: request.exam_date,
            grade: request.grade,
        }
    }

    pub fn to_list_dto(exams: Vec<DomainExam>) -> ExamListResponse {
        ExamListResponse {
            exams: exams.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_response_dto(domain: DomainExam, message: &str) -> ExamResponse {
        ExamResponse {
            exam: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }
}
