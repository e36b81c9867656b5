/// Part of the statement currently being lowered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Clause {
    Select,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Offset,
    Fetch,
    #[default]
    Irrelevant,
}
