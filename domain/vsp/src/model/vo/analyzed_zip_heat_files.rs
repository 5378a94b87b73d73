use std::collections::BTreeSet;

/// Heat analysis verdict on which files of a zip may become modules.
///
/// A file marked nested or other is never a module file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzedZipHeatFiles {
    nested_files: BTreeSet<String>,
    other_non_module_files: BTreeSet<String>,
    module_files: BTreeSet<String>,
}

impl AnalyzedZipHeatFiles {
    pub fn add_nested_file(&mut self, file_name: &str) {
        self.module_files.remove(file_name);
        self.nested_files.insert(file_name.to_owned());
    }

    pub fn add_nested_files<'a>(&mut self, file_names: impl IntoIterator<Item = &'a str>) {
        for file_name in file_names {
            self.add_nested_file(file_name);
        }
    }

    pub fn add_other_non_module_file(&mut self, file_name: &str) {
        self.module_files.remove(file_name);
        self.other_non_module_files.insert(file_name.to_owned());
    }

    pub fn add_other_non_module_files<'a>(&mut self, file_names: impl IntoIterator<Item = &'a str>) {
        for file_name in file_names {
            self.add_other_non_module_file(file_name);
        }
    }

    pub fn add_module_file(&mut self, file_name: &str) {
        self.module_files.insert(file_name.to_owned());
    }

    pub fn nested_files(&self) -> &BTreeSet<String> {
        &self.nested_files
    }

    pub fn other_non_module_files(&self) -> &BTreeSet<String> {
        &self.other_non_module_files
    }

    pub fn module_files(&self) -> &BTreeSet<String> {
        &self.module_files
    }

    pub fn is_not_eligible_for_module(&self, file_name: &str) -> bool {
        self.nested_files.contains(file_name) || self.other_non_module_files.contains(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marking_nested_removes_module() {
        let mut analyzed = AnalyzedZipHeatFiles::default();
        analyzed.add_module_file("a.yaml");
        analyzed.add_module_file("b.yaml");
        analyzed.add_nested_files(["a.yaml"]);
        analyzed.add_other_non_module_file("c.env");

        assert_eq!(analyzed.module_files().len(), 1);
        assert!(analyzed.is_not_eligible_for_module("a.yaml"));
        assert!(analyzed.is_not_eligible_for_module("c.env"));
        assert!(!analyzed.is_not_eligible_for_module("b.yaml"));
    }
}
