pub mod resume;

pub use resume::{Education, Experience, PersonalInfo, Project, ResumeData, ResumeRow};
