/// Static description of a resource table: its name plus the columns
/// eligible for free-text search and for sorting. One `const` per
/// resource lives next to that resource's types.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    pub searchable: &'static [&'static str],
    pub sortable: &'static [&'static str],
}
