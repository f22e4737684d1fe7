use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// String identifier tagged with the kind of object it names, so a
/// `NodeId` can never be passed where a `RequestId` is expected.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Serialize)]
#[serde(transparent)]
pub struct Id<T> {
    pub id: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Id { id: id.into(), _marker: PhantomData }
    }

    /// Builds a zero-padded name such as `Node-007` from a numeric index.
    pub fn numbered(prefix: &str, index: u64) -> Self {
        Id::new(format!("{}-{:03}", prefix, index))
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> From<Id<T>> for String {
    fn from(id_wrapper: Id<T>) -> Self {
        id_wrapper.id
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Id");

        write!(f, "{}: {:?}", display_name, self.id)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct NodeTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct RequestTag;

pub type NodeId = Id<NodeTag>;
pub type RequestId = Id<RequestTag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_ids_are_zero_padded() {
        assert_eq!(NodeId::numbered("Node", 7).as_str(), "Node-007");
        assert_eq!(RequestId::numbered("Request", 1234).as_str(), "Request-1234");
    }

    #[test]
    fn debug_output_names_the_id_kind() {
        let id = NodeId::new("Node-001");
        assert_eq!(format!("{:?}", id), "NodeId: \"Node-001\"");
        assert_eq!(format!("{}", id), "Node-001");
    }
}
