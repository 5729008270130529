//! Rule specifications: what flavor of game a server should run.

/// A named rule specification plus the mods folded into it.
///
/// The controller only carries this to the [`ServerLauncher`]
/// (crate::ServerLauncher); the actual rule content lives server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    /// Identifier of the base rule set, e.g. `"classic"`.
    pub name: String,
    /// Rule-modification packages applied on top, in order.
    pub mods: Vec<String>,
}

impl RuleSpec {
    /// Creates a specification for the named base rule set.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mods: Vec::new(),
        }
    }

    /// Merges the given mods into this specification, preserving order
    /// and skipping duplicates.
    pub fn merge_mods(&mut self, mods: &[String]) {
        for m in mods {
            if !self.mods.contains(m) {
                self.mods.push(m.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_mods_appends_in_order() {
        let mut spec = RuleSpec::new("classic");
        spec.merge_mods(&["a".to_string(), "b".to_string()]);
        assert_eq!(spec.mods, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_merge_mods_skips_duplicates() {
        let mut spec = RuleSpec::new("classic");
        spec.merge_mods(&["a".to_string()]);
        spec.merge_mods(&["a".to_string(), "b".to_string()]);
        assert_eq!(spec.mods, vec!["a".to_string(), "b".to_string()]);
    }
}
