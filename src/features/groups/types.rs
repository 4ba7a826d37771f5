use serde::{Deserialize, Serialize};

/// Group as returned by the backend. Fields are never edited in place; a
/// group is created, renamed or deleted as a whole.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize)]
pub struct GroupRequest<'a> {
    pub name: &'a str,
}
