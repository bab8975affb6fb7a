pub mod agenda_mapper;
pub mod announcement_mapper;
pub mod child_mapper;
pub mod exam_mapper;
pub mod homework_mapper;
pub mod link_mapper;
pub mod schedule_mapper;
pub mod subject_mapper;

pub use agenda_mapper::AgendaMapper;
pub use announcement_mapper::AnnouncementMapper;
pub use child_mapper::ChildMapper;
pub use exam_mapper::ExamMapper;
pub use homework_mapper::HomeworkMapper;
pub use link_mapper::LinkMapper;
pub use schedule_mapper::ScheduleMapper;
pub use subject_mapper::SubjectMapper;
