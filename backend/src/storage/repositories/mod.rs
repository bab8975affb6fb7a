// Repository modules
pub mod active_child_repository;
pub mod announcement_repository;
pub mod child_repository;
pub mod child_user_link_repository;
mod columns;
pub mod exam_repository;
pub mod homework_repository;
pub mod parent_child_repository;
pub mod schedule_repository;
pub mod subject_repository;

// Re-export repository types
pub use active_child_repository::ActiveChildRepository;
pub use announcement_repository::AnnouncementRepository;
pub use child_repository::ChildRepository;
pub use child_user_link_repository::ChildUserLinkRepository;
pub use exam_repository::ExamRepository;
pub use homework_repository::HomeworkRepository;
pub use parent_child_repository::ParentChildRepository;
pub use schedule_repository::ScheduleRepository;
pub use subject_repository::SubjectRepository;
