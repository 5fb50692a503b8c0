/// Handle of a node inside the list arena.
pub(crate) type NodeId = usize;

struct Node<T> {
   next: Option<NodeId>,
   prev: Option<NodeId>,
   // None while the slot sits on the free list
   element: Option<T>,
}

impl<T> Node<T> {
   fn new(element: T) -> Self {
      Self {
         next: None,
         prev: None,
         element: Some(element),
      }
   }
}

/// Doubly linked list whose nodes live in a `Vec` and link to each other by
/// index. Removed slots go on a free list and are handed out again by the next
/// push, so the arena never grows past the peak number of live elements.
pub(crate) struct List<T> {
   nodes: Vec<Node<T>>,
   free: Vec<NodeId>,
   head: Option<NodeId>,
   tail: Option<NodeId>,
}

impl<T> List<T> {
   pub fn with_capacity(cap: usize) -> Self {
      Self {
         nodes: Vec::with_capacity(cap),
         free: Vec::new(),
         head: None,
         tail: None,
      }
   }

   pub fn push_front(&mut self, ele: T) -> NodeId {
      let node = self.alloc(ele);
      self.attach_front(node);
      node
   }

   pub fn pop_back(&mut self) -> Option<T> {
      let node = self.tail?;
      self.remove_node(node)
   }

   pub fn get(&self, node: NodeId) -> Option<&T> {
      self.nodes.get(node)?.element.as_ref()
   }

   /// Moves a live node to the head. Stale handles are ignored.
   pub fn move_to_front(&mut self, node: NodeId) {
      if self.head == Some(node) || self.get(node).is_none() {
         return;
      }
      self.detach(node);
      self.attach_front(node);
   }

   /// Unlinks `node` and returns its element, recycling the slot.
   /// Returns `None` for a handle that is not live.
   pub fn remove_node(&mut self, node: NodeId) -> Option<T> {
      let element = self.nodes.get_mut(node)?.element.take()?;
      self.detach(node);
      self.free.push(node);
      Some(element)
   }

   fn alloc(&mut self, ele: T) -> NodeId {
      match self.free.pop() {
         Some(node) => {
            self.nodes[node] = Node::new(ele);
            node
         }
         None => {
            self.nodes.push(Node::new(ele));
            self.nodes.len() - 1
         }
      }
   }

   fn attach_front(&mut self, node: NodeId) {
      self.nodes[node].prev = None;
      self.nodes[node].next = self.head;
      match self.head {
         None => self.tail = Some(node),
         Some(head) => self.nodes[head].prev = Some(node),
      }
      self.head = Some(node);
   }

   fn detach(&mut self, node: NodeId) {
      let (prev, next) = (self.nodes[node].prev, self.nodes[node].next);
      match prev {
         None => self.head = next,
         Some(prev) => self.nodes[prev].next = next,
      }
      match next {
         None => self.tail = prev,
         Some(next) => self.nodes[next].prev = prev,
      }
      self.nodes[node].prev = None;
      self.nodes[node].next = None;
   }
}

#[cfg(test)]
impl<T> List<T> {
   pub fn len(&self) -> usize {
      self.iter().count()
   }

   pub fn is_empty(&self) -> bool {
      self.head.is_none() && self.tail.is_none()
   }

   /// Number of slots allocated in the arena, live or free.
   pub fn slots(&self) -> usize {
      self.nodes.len()
   }

   pub fn clear(&mut self) {
      self.nodes.clear();
      self.free.clear();
      self.head = None;
      self.tail = None;
   }

   /// Elements from head to tail.
   pub fn iter(&self) -> Iter<'_, T> {
      Iter {
         list: self,
         next: self.head,
      }
   }
}

#[cfg(test)]
pub(crate) struct Iter<'a, T> {
   list: &'a List<T>,
   next: Option<NodeId>,
}

#[cfg(test)]
impl<'a, T> Iterator for Iter<'a, T> {
   type Item = &'a T;

   fn next(&mut self) -> Option<Self::Item> {
      let node = self.next?;
      self.next = self.list.nodes[node].next;
      self.list.get(node)
   }
}
