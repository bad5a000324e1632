//! Core-metadata record rendering and parsing.
//!
//! Both drivers embed the same record: the email-header core-metadata
//! format (`Metadata-Version: 2.1`) written as `PKG-INFO` in a source
//! distribution and `METADATA` in a wheel's dist-info directory. The parser
//! exists for the verification round trip: extract an archive, read the
//! record back, and compare it against the manifest that produced it.

use crate::manifest::schema::CheckedManifest;

/// The metadata format revision this tool emits.
pub const METADATA_VERSION: &str = "2.1";

/// Render the core-metadata record for a validated manifest.
///
/// Headers appear in a fixed order; repeatable headers (`Classifier`,
/// `Requires-Dist`, `Provides-Extra`) appear once per value. Extras
/// dependencies carry an `extra == "name"` environment marker. The long
/// description, when present, follows the headers after a blank line.
#[must_use]
pub fn render_metadata(manifest: &CheckedManifest) -> String {
    let mut record = MetadataRecord::default();
    record.add("Metadata-Version", METADATA_VERSION);
    record.add("Name", manifest.name.as_str());
    record.add("Version", manifest.version.as_str());
    record.add_opt("Summary", manifest.description.as_deref());
    record.add_opt("Home-page", manifest.url.as_deref());
    record.add_opt("Author", manifest.author.as_deref());
    record.add_opt("Author-email", manifest.author_email.as_deref());
    record.add_opt("Maintainer", manifest.maintainer.as_deref());
    record.add_opt("Maintainer-email", manifest.maintainer_email.as_deref());
    record.add_opt("License", manifest.license.as_deref());
    for classifier in &manifest.classifiers {
        record.add("Classifier", classifier);
    }
    record.add_opt("Requires-Python", manifest.python_requires.as_deref());
    record.add_opt(
        "Description-Content-Type",
        manifest.long_description_content_type.as_deref(),
    );
    for req in &manifest.install_requires {
        record.add("Requires-Dist", req.as_str());
    }
    for (extra, reqs) in &manifest.extras_require {
        record.add("Provides-Extra", extra);
        for req in reqs {
            record.add("Requires-Dist", &format!("{req} ; extra == \"{extra}\""));
        }
    }

    record.body = manifest.long_description.clone().unwrap_or_default();
    record.render()
}

/// Render the `entry_points.txt` ini document for a validated manifest.
///
/// Returns `None` when the manifest declares no entry points, in which case
/// the drivers omit the file entirely.
#[must_use]
pub fn render_entry_points(manifest: &CheckedManifest) -> Option<String> {
    if manifest.entry_points.is_empty() {
        return None;
    }
    let mut out = String::new();
    for (group, entry_points) in &manifest.entry_points {
        out.push_str(&format!("[{group}]\n"));
        for ep in entry_points {
            out.push_str(&format!("{ep}\n"));
        }
        out.push('\n');
    }
    Some(out)
}

/// A parsed (or under-construction) core-metadata record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    /// Header fields in emission order.
    pub fields: Vec<(String, String)>,
    /// The description body after the blank separator line.
    pub body: String,
}

impl MetadataRecord {
    /// Return the first value for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Return every value for a repeatable header.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    fn add(&mut self, name: &str, value: &str) {
        self.fields.push((name.to_owned(), value.to_owned()));
    }

    fn add_opt(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.add(name, value);
        }
    }

    /// Serialize the record to its on-disk form.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.fields {
            out.push_str(&format!("{name}: {value}\n"));
        }
        if !self.body.is_empty() {
            out.push('\n');
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }
}

/// Parse a core-metadata record back from its on-disk form.
///
/// Lines before the first blank line are `Name: value` headers; everything
/// after it is the description body. Lines without a colon are skipped
/// rather than rejected, since the record is this tool's own output.
#[must_use]
pub fn parse_metadata(document: &str) -> MetadataRecord {
    let mut record = MetadataRecord::default();
    let mut lines = document.lines();
    for line in lines.by_ref() {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            record.add(name.trim(), value.trim());
        }
    }
    let body: Vec<&str> = lines.collect();
    if !body.is_empty() {
        record.body = format!("{}\n", body.join("\n"));
    }
    record
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
