use std::collections::{VecDeque, vec_deque};

use crate::domain::request::request::Request;

/// FIFO of pending requests in arrival order.
///
/// New arrivals go to the back. A request that could not be placed is put
/// back at the front so it is the first one retried.
#[derive(Debug, Clone, Default)]
pub struct RequestQueue {
    requests: VecDeque<Request>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self { requests: VecDeque::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Removes the head request, `None` if the queue is empty.
    pub fn pop_front(&mut self) -> Option<Request> {
        self.requests.pop_front()
    }

    /// Restores a request that could not be placed.
    pub fn push_front(&mut self, request: Request) {
        self.requests.push_front(request);
    }

    pub fn push_back(&mut self, request: Request) {
        self.requests.push_back(request);
    }

    pub fn front(&self) -> Option<&Request> {
        self.requests.front()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, Request> {
        self.requests.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::utils::id::RequestId;

    fn request(name: &str, units: u64) -> Request {
        Request::new(RequestId::new(name), units, 1, 0).unwrap()
    }

    #[test]
    fn pop_front_on_empty_queue_is_none() {
        let mut queue = RequestQueue::new();
        assert!(queue.is_empty());
        assert!(queue.pop_front().is_none());
    }

    #[test]
    fn push_back_keeps_arrival_order() {
        let mut queue = RequestQueue::new();
        queue.push_back(request("a", 1));
        queue.push_back(request("b", 2));
        queue.push_back(request("c", 3));

        let order: Vec<&str> = queue.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert_eq!(queue.pop_front().unwrap().id().as_str(), "a");
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn push_front_restores_head_ahead_of_newer_arrivals() {
        let mut queue = RequestQueue::new();
        queue.push_back(request("a", 1));
        queue.push_back(request("b", 2));

        let head = queue.pop_front().unwrap();
        queue.push_back(request("c", 3));
        queue.push_front(head);

        assert_eq!(queue.front().unwrap().id().as_str(), "a");
        let order: Vec<&str> = queue.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }
}
