//! Static help content, shown as an accordion where at most one entry is open.

pub struct HelpEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const HELP_ENTRIES: &[HelpEntry] = &[
    HelpEntry {
        question: "What is a function signature?",
        answer: "A function signature is a unique identifier for a function in Ethereum smart \
                 contracts. It is the first 4 bytes of the Keccak-256 hash of the function name \
                 and its parameter types.",
    },
    HelpEntry {
        question: "When do I need to decode signatures?",
        answer: "When analyzing blockchain transactions, debugging smart contracts, or working \
                 out which function a transaction called. It is especially useful for security \
                 audits and transaction analysis.",
    },
    HelpEntry {
        question: "Why are some signatures not found?",
        answer: "The directory relies on community submissions. Private or custom functions, \
                 signatures nobody has submitted yet, and newer contracts that have not been \
                 indexed will not be found. You can add them with the add mode.",
    },
    HelpEntry {
        question: "How do I find a function signature?",
        answer: "Function signatures appear in transaction data and contract ABIs, or can be \
                 computed by hashing the function name and parameters. For example, the \
                 signature for \"transfer(address,uint256)\" is 0xa9059cbb. The `hash` command \
                 computes it locally.",
    },
];

/// Which help entry is expanded.
#[derive(Debug, Default)]
pub struct HelpPanel {
    open: Option<usize>,
}

impl HelpPanel {
    /// Opening an entry closes any other; toggling the open entry closes it.
    pub fn toggle(&mut self, index: usize) -> Option<&'static HelpEntry> {
        if index >= HELP_ENTRIES.len() || self.open == Some(index) {
            self.open = None;
        } else {
            self.open = Some(index);
        }
        self.open_entry()
    }

    pub fn open_entry(&self) -> Option<&'static HelpEntry> {
        self.open.map(|i| &HELP_ENTRIES[i])
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Question labels with an expand marker.
    pub fn labels(&self) -> Vec<String> {
        HELP_ENTRIES
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let icon = if self.is_open(i) { '−' } else { '+' };
                format!("{icon} {}", e.question)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_entry_open_at_a_time() {
        let mut panel = HelpPanel::default();
        assert!(panel.open_entry().is_none());

        let entry = panel.toggle(0).unwrap();
        assert_eq!(entry.question, "What is a function signature?");

        panel.toggle(2);
        assert!(panel.is_open(2));
        assert!(!panel.is_open(0));
    }

    #[test]
    fn test_toggling_open_entry_closes_it() {
        let mut panel = HelpPanel::default();
        panel.toggle(1);
        assert!(panel.toggle(1).is_none());
        assert!(panel.toggle(99).is_none());
    }

    #[test]
    fn test_labels_mark_open_entry() {
        let mut panel = HelpPanel::default();
        panel.toggle(3);
        let labels = panel.labels();
        assert_eq!(labels.len(), HELP_ENTRIES.len());
        assert!(labels[0].starts_with('+'));
        assert!(labels[3].starts_with('−'));
    }
}
