//! Builds the renderable content tree from a structured résumé record.
//!
//! Mirrors what the preview pane shows: overlay placeholders first (so the
//! user sees the header band and watermark in place), then the single-column
//! flow of sections. Blank fields are skipped rather than rendered empty.

use crate::content::tree::{ContentBlock, ContentTree, OverlayKind};
use crate::models::ResumeData;

pub fn build_tree(resume: &ResumeData) -> ContentTree {
    let mut blocks = vec![
        ContentBlock::overlay_placeholder(OverlayKind::Watermark),
        ContentBlock::overlay_placeholder(OverlayKind::Header),
    ];

    let info = &resume.personal_info;
    if !info.full_name.trim().is_empty() {
        blocks.push(ContentBlock::heading(info.full_name.trim(), 1));
    }
    push_key_value(&mut blocks, "Email", &info.email);
    push_key_value(&mut blocks, "Phone", &info.phone);
    push_key_value(&mut blocks, "Location", &info.location);
    push_key_value(&mut blocks, "LinkedIn", &info.linkedin);
    push_key_value(&mut blocks, "Website", &info.website);
    push_key_value(&mut blocks, "Target Role", &info.job_title);

    if !info.summary.trim().is_empty() {
        blocks.push(ContentBlock::section(
            "Professional Summary",
            vec![ContentBlock::paragraph(info.summary.trim())],
        ));
    }

    let experience_blocks: Vec<ContentBlock> = resume
        .experiences
        .iter()
        .flat_map(|exp| {
            let mut entry = Vec::new();
            entry.push(ContentBlock::heading(
                format!("{}, {}", exp.role.trim(), exp.company.trim()),
                2,
            ));
            let end = if exp.is_current {
                "Present"
            } else {
                exp.end_date.trim()
            };
            if !exp.start_date.trim().is_empty() || !end.is_empty() {
                entry.push(ContentBlock::key_value(
                    "Duration",
                    format!("{} to {}", exp.start_date.trim(), end),
                ));
            }
            entry.extend(bullet_lines(&exp.description));
            entry
        })
        .collect();
    push_section(&mut blocks, "Work Experience", experience_blocks);

    let project_blocks: Vec<ContentBlock> = resume
        .projects
        .iter()
        .flat_map(|project| {
            let mut entry = vec![ContentBlock::heading(project.name.trim(), 2)];
            if !project.description.trim().is_empty() {
                entry.push(ContentBlock::paragraph(project.description.trim()));
            }
            if !project.link.trim().is_empty() {
                entry.push(ContentBlock::key_value("Link", project.link.trim()));
            }
            entry
        })
        .collect();
    push_section(&mut blocks, "Projects", project_blocks);

    let education_blocks: Vec<ContentBlock> = resume
        .education
        .iter()
        .flat_map(|edu| {
            let mut entry = vec![ContentBlock::heading(
                format!("{}, {}", edu.degree.trim(), edu.institution.trim()),
                2,
            )];
            if !edu.graduation_year.trim().is_empty() {
                entry.push(ContentBlock::key_value(
                    "Graduated",
                    edu.graduation_year.trim(),
                ));
            }
            entry
        })
        .collect();
    push_section(&mut blocks, "Education", education_blocks);

    let skill_blocks: Vec<ContentBlock> = resume
        .skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| ContentBlock::bullet(s.trim()))
        .collect();
    push_section(&mut blocks, "Skills", skill_blocks);

    ContentTree::new(blocks)
}

/// One bullet block per non-empty line of a description field.
fn bullet_lines(description: &str) -> Vec<ContentBlock> {
    description
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ContentBlock::bullet)
        .collect()
}

fn push_key_value(blocks: &mut Vec<ContentBlock>, label: &str, value: &str) {
    if !value.trim().is_empty() {
        blocks.push(ContentBlock::key_value(label, value.trim()));
    }
}

/// Sections with no content are dropped entirely.
fn push_section(blocks: &mut Vec<ContentBlock>, title: &str, children: Vec<ContentBlock>) {
    if !children.is_empty() {
        blocks.push(ContentBlock::section(title, children));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tree::BlockKind;
    use crate::models::{Experience, ResumeData};
    use uuid::Uuid;

    fn resume_with_experience(description: &str) -> ResumeData {
        let mut resume = ResumeData::new("Test");
        resume.personal_info.full_name = "Jane Doe".to_string();
        resume.experiences.push(Experience {
            id: Uuid::new_v4(),
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            start_date: "2020".to_string(),
            end_date: String::new(),
            is_current: true,
            description: description.to_string(),
        });
        resume
    }

    #[test]
    fn test_placeholders_come_first() {
        let tree = build_tree(&ResumeData::new("Empty"));
        assert!(matches!(
            tree.blocks[0].kind,
            BlockKind::OverlayPlaceholder {
                kind: OverlayKind::Watermark
            }
        ));
        assert!(matches!(
            tree.blocks[1].kind,
            BlockKind::OverlayPlaceholder {
                kind: OverlayKind::Header
            }
        ));
    }

    #[test]
    fn test_empty_resume_has_only_placeholders() {
        let tree = build_tree(&ResumeData::new("Empty"));
        assert_eq!(tree.blocks.len(), 2);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_description_lines_become_atomic_bullets() {
        let tree = build_tree(&resume_with_experience(
            "Shipped the billing service\n\n  Cut p99 latency by 40%  \n",
        ));
        let section = tree
            .blocks
            .iter()
            .find_map(|b| match &b.kind {
                BlockKind::Section { title, children } if title == "Work Experience" => {
                    Some(children)
                }
                _ => None,
            })
            .expect("experience section present");

        let bullets: Vec<&str> = section
            .iter()
            .filter_map(|b| match &b.kind {
                BlockKind::Bullet { text } => {
                    assert!(b.atomic, "bullets must be atomic");
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            bullets,
            vec!["Shipped the billing service", "Cut p99 latency by 40%"]
        );
    }

    #[test]
    fn test_current_role_renders_present() {
        let tree = build_tree(&resume_with_experience("Did things"));
        let json = serde_json::to_string(&tree).unwrap();
        assert!(json.contains("2020 to Present"));
    }

    #[test]
    fn test_blank_fields_are_skipped() {
        let mut resume = ResumeData::new("Sparse");
        resume.personal_info.email = "  ".to_string();
        let tree = build_tree(&resume);
        let has_email = tree.blocks.iter().any(|b| {
            matches!(&b.kind, BlockKind::KeyValue { label, .. } if label == "Email")
        });
        assert!(!has_email);
    }

    #[test]
    fn test_summary_paragraph_is_not_atomic() {
        let mut resume = ResumeData::new("Summary");
        resume.personal_info.summary = "A seasoned engineer.".to_string();
        let tree = build_tree(&resume);
        let summary = tree
            .blocks
            .iter()
            .find_map(|b| match &b.kind {
                BlockKind::Section { title, children } if title == "Professional Summary" => {
                    children.first()
                }
                _ => None,
            })
            .expect("summary section present");
        assert!(!summary.atomic);
    }
}
