use crate::domain::model::InputRecord;
use regex::Regex;
use std::sync::LazyLock;

/// Standalone words that mark a row as test or placeholder data. Case-sensitive.
pub const TEST_MARKERS: [&str; 6] = ["test", "Test", "TEST", "DONOTFILL", "DoNotFill", "donotfill"];

static TEST_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", TEST_MARKERS.join("|"))).expect("test marker pattern")
});

/// Decides whether a raw row belongs in the quarantine table.
pub trait QuarantineRule {
    fn name(&self) -> &str;
    fn matches(&self, record: &InputRecord) -> bool;
}

/// Cleans a row that was not quarantined.
pub trait RowTransform {
    fn apply(&self, record: &mut InputRecord);
}

/// Quarantines rows where any value contains a test marker as a whole word.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestWordRule;

impl TestWordRule {
    pub fn is_test_value(value: &str) -> bool {
        TEST_WORD.is_match(value)
    }
}

impl QuarantineRule for TestWordRule {
    fn name(&self) -> &str {
        "test-word"
    }

    fn matches(&self, record: &InputRecord) -> bool {
        record.values().iter().any(|v| Self::is_test_value(v))
    }
}

/// Replaces the literal `NULL` (any case) with an empty value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAsEmpty;

impl RowTransform for NullAsEmpty {
    fn apply(&self, record: &mut InputRecord) {
        for value in record.values_mut() {
            if value.eq_ignore_ascii_case("NULL") {
                value.clear();
            }
        }
    }
}

#[derive(Debug)]
pub enum Disposition {
    /// Original, uncleaned row plus the name of the rule that caught it.
    Quarantined { record: InputRecord, rule: String },
    MissingEmail { row: usize },
    Admitted { email: String, record: InputRecord },
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub struct RowClassifier {
    rules: Vec<Box<dyn QuarantineRule>>,
    transforms: Vec<Box<dyn RowTransform>>,
}

impl RowClassifier {
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            transforms: Vec::new(),
        }
    }

    /// Test-word quarantine followed by NULL cleaning.
    pub fn standard() -> Self {
        Self::empty()
            .with_rule(TestWordRule)
            .with_transform(NullAsEmpty)
    }

    pub fn with_rule(mut self, rule: impl QuarantineRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn with_transform(mut self, transform: impl RowTransform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    pub fn classify(&self, mut record: InputRecord) -> Disposition {
        if let Some(rule) = self.rules.iter().find(|r| r.matches(&record)) {
            return Disposition::Quarantined {
                rule: rule.name().to_string(),
                record,
            };
        }

        for transform in &self.transforms {
            transform.apply(&mut record);
        }

        let email = normalize_email(record.get("billing_email"));
        if email.is_empty() {
            return Disposition::MissingEmail {
                row: record.row_number,
            };
        }
        Disposition::Admitted { email, record }
    }
}

impl Default for RowClassifier {
    fn default() -> Self {
        Self::standard()
    }
}
