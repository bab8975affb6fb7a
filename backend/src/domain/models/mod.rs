pub mod announcement;
pub mod child;
pub mod exam;
pub mod homework;
pub mod link;
pub mod schedule;
pub mod session;
pub mod subject;

pub use announcement::Announcement;
pub use child::{Child, ParentChildRelation};
pub use exam::{Exam, ExamType};
pub use homework::Homework;
pub use link::ChildUserLink;
pub use schedule::ScheduleEvent;
pub use session::{SessionContext, UserRole};
pub use subject::Subject;
