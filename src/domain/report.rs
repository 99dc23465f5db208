//! Monthly report accumulation and rendering
//!
//! Reports are keyed by month label, then by display tag. Both levels keep
//! insertion order; tags are only sorted when a month is rendered.

/// Post blocks filed under one display tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSection {
    pub tag: String,
    pub blocks: Vec<String>,
}

/// All sections of one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthReport {
    pub label: String,
    sections: Vec<TagSection>,
}

impl MonthReport {
    pub fn new(label: impl Into<String>) -> Self {
        MonthReport {
            label: label.into(),
            sections: Vec::new(),
        }
    }

    /// Append a block to the section for `tag`, creating it if needed
    pub fn push(&mut self, tag: &str, block: String) {
        match self.sections.iter_mut().find(|s| s.tag == tag) {
            Some(section) => section.blocks.push(block),
            None => self.sections.push(TagSection {
                tag: tag.to_string(),
                blocks: vec![block],
            }),
        }
    }

    pub fn sections(&self) -> &[TagSection] {
        &self.sections
    }

    pub fn post_count(&self) -> usize {
        self.sections.iter().map(|s| s.blocks.len()).sum()
    }

    /// Sections sorted by display tag, with `other_tag` moved to the end
    pub fn ordered_sections(&self, other_tag: &str) -> Vec<&TagSection> {
        let mut ordered: Vec<&TagSection> =
            self.sections.iter().filter(|s| s.tag != other_tag).collect();
        ordered.sort_by(|a, b| a.tag.cmp(&b.tag));
        if let Some(other) = self.sections.iter().find(|s| s.tag == other_tag) {
            ordered.push(other);
        }
        ordered
    }

    /// Render the full wiki page text
    pub fn render(&self, header_template: &str, other_tag: &str) -> String {
        let mut text = format!(
            "{{{{{}|title={}|subtitle=Report}}}}\n\n",
            header_template, self.label
        );

        for section in self.ordered_sections(other_tag) {
            text.push_str(&format!("== {} ==\n", section.tag));
            for block in &section.blocks {
                text.push_str(block);
                text.push('\n');
            }
        }

        text
    }
}

/// Reports for every month touched by a run, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportBook {
    months: Vec<MonthReport>,
}

impl ReportBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-or-append a block under (month, tag)
    pub fn push(&mut self, month: &str, tag: &str, block: String) {
        let index = match self.months.iter().position(|m| m.label == month) {
            Some(index) => index,
            None => {
                self.months.push(MonthReport::new(month));
                self.months.len() - 1
            }
        };
        self.months[index].push(tag, block);
    }

    pub fn months(&self) -> &[MonthReport] {
        &self.months
    }

    pub fn month(&self, label: &str) -> Option<&MonthReport> {
        self.months.iter().find(|m| m.label == label)
    }

    pub fn post_count(&self) -> usize {
        self.months.iter().map(MonthReport::post_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OTHER: &str = "{{P|Other}}";

    #[test]
    fn test_push_keeps_insertion_order_within_tag() {
        let mut report = MonthReport::new("June 2023");
        report.push("{{P|Events}}", "first".to_string());
        report.push("{{P|Events}}", "second".to_string());
        assert_eq!(report.sections().len(), 1);
        assert_eq!(report.sections()[0].blocks, vec!["first", "second"]);
        assert_eq!(report.post_count(), 2);
    }

    #[test]
    fn test_ordered_sections_sorted() {
        let mut report = MonthReport::new("June 2023");
        report.push("{{P|Zoo}}", "z".to_string());
        report.push("{{P|Alpha}}", "a".to_string());
        report.push("{{P|Media}}", "m".to_string());

        let tags: Vec<&str> = report
            .ordered_sections(OTHER)
            .iter()
            .map(|s| s.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["{{P|Alpha}}", "{{P|Media}}", "{{P|Zoo}}"]);
    }

    #[test]
    fn test_other_always_last() {
        let mut report = MonthReport::new("June 2023");
        report.push(OTHER, "o".to_string());
        report.push("{{P|Zoo}}", "z".to_string());
        report.push("{{P|Alpha}}", "a".to_string());

        let sections = report.ordered_sections(OTHER);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections.last().unwrap().tag, OTHER);
    }

    #[test]
    fn test_render() {
        let mut report = MonthReport::new("June 2023");
        report.push(OTHER, "\nother block".to_string());
        report.push("{{P|Events}}", "\nevent block".to_string());

        let text = report.render("Header", OTHER);
        assert_eq!(
            text,
            "{{Header|title=June 2023|subtitle=Report}}\n\n\
             == {{P|Events}} ==\n\nevent block\n\
             == {{P|Other}} ==\n\nother block\n"
        );
    }

    #[test]
    fn test_book_groups_by_month() {
        let mut book = ReportBook::new();
        book.push("June 2023", "{{P|A}}", "1".to_string());
        book.push("May 2023", "{{P|A}}", "2".to_string());
        book.push("June 2023", "{{P|B}}", "3".to_string());

        let labels: Vec<&str> = book.months().iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["June 2023", "May 2023"]);
        assert_eq!(book.month("June 2023").unwrap().sections().len(), 2);
        assert_eq!(book.post_count(), 3);
        assert!(book.month("July 2023").is_none());
    }
}
