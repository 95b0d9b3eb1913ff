//! The two TOC element/attribute dialects and how to tell them apart.
//!
//! Element names and attribute names are dispatched through the lookup
//! table below rather than through dynamic "does this attribute exist
//! under any of these names" probing, so adding a third dialect later is a
//! one-table change.

/// Which vocabulary a TOC document uses for element and attribute names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `Section` / `Page` / `Identifiers` / `HelpID`, attributes `Id` / `Text` / `File` / `Value`.
    Verbose,
    /// `S` / `P` / `I` / `H`, attributes `Id` / `t` / `p` / `v`.
    Abbreviated,
}

/// The element and attribute names a [`Dialect`] uses.
pub(crate) struct Tags {
    pub section: &'static str,
    pub page: &'static str,
    pub identifiers: &'static str,
    pub help_id: &'static str,
    pub attr_id: &'static str,
    pub attr_text: &'static str,
    pub attr_file: &'static str,
    pub attr_value: &'static str,
}

const VERBOSE: Tags = Tags {
    section: "Section",
    page: "Page",
    identifiers: "Identifiers",
    help_id: "HelpID",
    attr_id: "Id",
    attr_text: "Text",
    attr_file: "File",
    attr_value: "Value",
};

const ABBREVIATED: Tags = Tags {
    section: "S",
    page: "P",
    identifiers: "I",
    help_id: "H",
    attr_id: "Id",
    attr_text: "t",
    attr_file: "p",
    attr_value: "v",
};

impl Dialect {
    /// Picks a dialect by inspecting the first structural (non-root) element name seen.
    ///
    /// `Section`/`S` and `Page`/`P` are both accepted as sniff targets; any other
    /// element name (e.g. the `BrHelpContent` root) is skipped by the caller before
    /// this is consulted.
    pub(crate) fn sniff(first_element: &str) -> Option<Self> {
        match first_element {
            "Section" | "Page" => Some(Self::Verbose),
            "S" | "P" => Some(Self::Abbreviated),
            _ => None,
        }
    }

    pub(crate) fn tags(self) -> &'static Tags {
        match self {
            Self::Verbose => &VERBOSE,
            Self::Abbreviated => &ABBREVIATED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_verbose_from_section() {
        assert_eq!(Dialect::sniff("Section"), Some(Dialect::Verbose));
    }

    #[test]
    fn sniffs_abbreviated_from_page() {
        assert_eq!(Dialect::sniff("P"), Some(Dialect::Abbreviated));
    }

    #[test]
    fn unknown_element_is_not_sniffed() {
        assert_eq!(Dialect::sniff("BrHelpContent"), None);
    }
}
