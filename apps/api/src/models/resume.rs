//! Structured résumé records.
//!
//! `ResumeData` is the document the form UI edits and the renderer consumes.
//! It is stored in PostgreSQL as a JSONB blob plus a few promoted columns
//! (`ResumeRow`); the promoted columns win over the blob on read so that
//! server-side updates (like recording an uploaded PDF's URL) are never
//! shadowed by a stale client copy.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
    /// Target job title, not a past role.
    pub job_title: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub is_current: bool,
    /// Bullet points, one per line.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
    pub is_current: bool,
    pub graduation_year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    pub id: Uuid,
    pub title: String,
    pub last_updated: DateTime<Utc>,
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Public URL of the most recently persisted PDF artifact, if any.
    #[serde(default)]
    pub pdf_url: Option<String>,
}

impl ResumeData {
    /// A fresh, empty record with a caller-chosen title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            last_updated: Utc::now(),
            personal_info: PersonalInfo::default(),
            experiences: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            pdf_url: None,
        }
    }
}

/// Raw row of the `resumes` table. The full document lives in `data`;
/// `pdf_url` is promoted so the renderer can update it without rewriting
/// the blob.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub title: String,
    pub last_updated: DateTime<Utc>,
    pub data: Value,
    pub pdf_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_data_round_trips_through_json() {
        let mut resume = ResumeData::new("Backend roles");
        resume.personal_info.full_name = "Jane Doe".to_string();
        resume.skills = vec!["Rust".to_string(), "PostgreSQL".to_string()];

        let json = serde_json::to_string(&resume).unwrap();
        let recovered: ResumeData = serde_json::from_str(&json).unwrap();

        assert_eq!(recovered, resume);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        // Older client payloads may omit collection fields entirely.
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "title": "Untitled Resume",
            "last_updated": Utc::now(),
            "personal_info": {
                "full_name": "", "email": "", "phone": "", "location": "",
                "linkedin": "", "website": "", "job_title": "", "summary": ""
            }
        });
        let resume: ResumeData = serde_json::from_value(json).unwrap();
        assert!(resume.experiences.is_empty());
        assert!(resume.skills.is_empty());
        assert!(resume.pdf_url.is_none());
    }
}
