//! Red-black tree threaded with an in-order doubly linked list.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]; parent, child and
//! neighbour links are plain indices, so the tree owns every node and the links
//! never form ownership cycles. Removed slots go onto a free list and are reused
//! by later insertions.
//!
//! The tree is never searched by key. Callers walk it themselves (the beachline
//! by breakpoint geometry, the event queue by `(y, x)`) and then insert relative
//! to a known node.

pub type NodeId = usize;

#[derive(Clone, Debug)]
struct RbNode<T> {
    value: T,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    red: bool,
}

/// Arena-backed red-black tree with O(1) access to in-order neighbours.
#[derive(Clone, Debug)]
pub struct RbTree<T> {
    nodes: Vec<RbNode<T>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
}

impl<T> Default for RbTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RbTree<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> &T {
        &self.nodes[id].value
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.nodes[id].value
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].left
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].right
    }

    /// In-order predecessor.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].prev
    }

    /// In-order successor.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].next
    }

    /// The leftmost node, or `None` if the tree is empty.
    pub fn first(&self) -> Option<NodeId> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Iterates node ids in order, following the linked list.
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.first(), move |&id| self.next(id))
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.nodes[id].red)
    }

    fn alloc(&mut self, value: T) -> NodeId {
        let node = RbNode {
            value,
            parent: None,
            left: None,
            right: None,
            prev: None,
            next: None,
            red: true,
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Inserts `value` immediately after `after` in the in-order sequence.
    ///
    /// With `after == None` the value becomes the first node (or the root of an
    /// empty tree). Returns the id of the new node.
    pub fn insert(&mut self, after: Option<NodeId>, value: T) -> NodeId {
        let node = self.alloc(value);
        let parent = match after {
            Some(after) => {
                let next = self.nodes[after].next;
                self.nodes[node].prev = Some(after);
                self.nodes[node].next = next;
                if let Some(next) = next {
                    self.nodes[next].prev = Some(node);
                }
                self.nodes[after].next = Some(node);
                match self.nodes[after].right {
                    Some(right) => {
                        let parent = self.leftmost(right);
                        self.nodes[parent].left = Some(node);
                        Some(parent)
                    }
                    None => {
                        self.nodes[after].right = Some(node);
                        Some(after)
                    }
                }
            }
            None => match self.root {
                Some(root) => {
                    let first = self.leftmost(root);
                    self.nodes[node].next = Some(first);
                    self.nodes[first].prev = Some(node);
                    self.nodes[first].left = Some(node);
                    Some(first)
                }
                None => {
                    self.root = Some(node);
                    None
                }
            },
        };
        self.nodes[node].parent = parent;
        self.len += 1;
        self.insert_fixup(node);
        node
    }

    fn insert_fixup(&mut self, mut node: NodeId) {
        let mut parent = self.nodes[node].parent;
        while let Some(mut p) = parent {
            if !self.nodes[p].red {
                break;
            }
            let grandpa = self.nodes[p].parent.expect("red node is never the root");
            if self.nodes[grandpa].left == Some(p) {
                let uncle = self.nodes[grandpa].right;
                if self.is_red(uncle) {
                    let uncle = uncle.expect("red uncle exists");
                    self.nodes[p].red = false;
                    self.nodes[uncle].red = false;
                    self.nodes[grandpa].red = true;
                    node = grandpa;
                } else {
                    if self.nodes[p].right == Some(node) {
                        self.rotate_left(p);
                        node = p;
                        p = self.nodes[node].parent.expect("rotated node has a parent");
                    }
                    self.nodes[p].red = false;
                    self.nodes[grandpa].red = true;
                    self.rotate_right(grandpa);
                }
            } else {
                let uncle = self.nodes[grandpa].left;
                if self.is_red(uncle) {
                    let uncle = uncle.expect("red uncle exists");
                    self.nodes[p].red = false;
                    self.nodes[uncle].red = false;
                    self.nodes[grandpa].red = true;
                    node = grandpa;
                } else {
                    if self.nodes[p].left == Some(node) {
                        self.rotate_right(p);
                        node = p;
                        p = self.nodes[node].parent.expect("rotated node has a parent");
                    }
                    self.nodes[p].red = false;
                    self.nodes[grandpa].red = true;
                    self.rotate_left(grandpa);
                }
            }
            parent = self.nodes[node].parent;
        }
        if let Some(root) = self.root {
            self.nodes[root].red = false;
        }
    }

    /// Removes `node` from both the tree and the linked list and recycles its slot.
    ///
    /// The id must not be used again until a later `insert` hands it back out.
    pub fn remove(&mut self, node: NodeId) {
        let prev = self.nodes[node].prev;
        let next = self.nodes[node].next;
        if let Some(next) = next {
            self.nodes[next].prev = prev;
        }
        if let Some(prev) = prev {
            self.nodes[prev].next = next;
        }

        let mut parent = self.nodes[node].parent;
        let left = self.nodes[node].left;
        let right = self.nodes[node].right;

        let successor = match (left, right) {
            (None, _) => right,
            (_, None) => left,
            (Some(_), Some(right)) => Some(self.leftmost(right)),
        };

        match parent {
            Some(p) if self.nodes[p].left == Some(node) => self.nodes[p].left = successor,
            Some(p) => self.nodes[p].right = successor,
            None => self.root = successor,
        }

        let red;
        let child;
        if let (Some(left), Some(right), Some(next)) = (left, right, successor) {
            red = self.nodes[next].red;
            self.nodes[next].red = self.nodes[node].red;
            self.nodes[next].left = Some(left);
            self.nodes[left].parent = Some(next);
            if next != right {
                let next_parent = self.nodes[next].parent.expect("successor has a parent");
                self.nodes[next].parent = parent;
                child = self.nodes[next].right;
                self.nodes[next_parent].left = child;
                self.nodes[next].right = Some(right);
                self.nodes[right].parent = Some(next);
                parent = Some(next_parent);
            } else {
                self.nodes[next].parent = parent;
                parent = Some(next);
                child = self.nodes[next].right;
            }
        } else {
            red = self.nodes[node].red;
            child = successor;
        }

        if let Some(child) = child {
            self.nodes[child].parent = parent;
        }
        self.release(node);

        if red {
            return;
        }
        if let Some(c) = child.filter(|&c| self.nodes[c].red) {
            self.nodes[c].red = false;
            return;
        }
        self.remove_fixup(child, parent);
    }

    fn remove_fixup(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) {
        loop {
            if node == self.root {
                break;
            }
            let p = parent.expect("non-root node has a parent");
            let sibling = if node == self.nodes[p].left {
                let mut sibling = self.nodes[p].right.expect("double-black node has a sibling");
                if self.nodes[sibling].red {
                    self.nodes[sibling].red = false;
                    self.nodes[p].red = true;
                    self.rotate_left(p);
                    sibling = self.nodes[p].right.expect("double-black node has a sibling");
                }
                if self.is_red(self.nodes[sibling].left) || self.is_red(self.nodes[sibling].right) {
                    if !self.is_red(self.nodes[sibling].right) {
                        let near = self.nodes[sibling].left.expect("red nephew exists");
                        self.nodes[near].red = false;
                        self.nodes[sibling].red = true;
                        self.rotate_right(sibling);
                        sibling = self.nodes[p].right.expect("double-black node has a sibling");
                    }
                    self.nodes[sibling].red = self.nodes[p].red;
                    self.nodes[p].red = false;
                    let far = self.nodes[sibling].right.expect("red nephew exists");
                    self.nodes[far].red = false;
                    self.rotate_left(p);
                    node = self.root;
                    break;
                }
                sibling
            } else {
                let mut sibling = self.nodes[p].left.expect("double-black node has a sibling");
                if self.nodes[sibling].red {
                    self.nodes[sibling].red = false;
                    self.nodes[p].red = true;
                    self.rotate_right(p);
                    sibling = self.nodes[p].left.expect("double-black node has a sibling");
                }
                if self.is_red(self.nodes[sibling].left) || self.is_red(self.nodes[sibling].right) {
                    if !self.is_red(self.nodes[sibling].left) {
                        let near = self.nodes[sibling].right.expect("red nephew exists");
                        self.nodes[near].red = false;
                        self.nodes[sibling].red = true;
                        self.rotate_left(sibling);
                        sibling = self.nodes[p].left.expect("double-black node has a sibling");
                    }
                    self.nodes[sibling].red = self.nodes[p].red;
                    self.nodes[p].red = false;
                    let far = self.nodes[sibling].left.expect("red nephew exists");
                    self.nodes[far].red = false;
                    self.rotate_right(p);
                    node = self.root;
                    break;
                }
                sibling
            };
            self.nodes[sibling].red = true;
            node = Some(p);
            parent = self.nodes[p].parent;
            if self.nodes[p].red {
                break;
            }
        }
        if let Some(node) = node {
            self.nodes[node].red = false;
        }
    }

    fn release(&mut self, id: NodeId) {
        let node = &mut self.nodes[id];
        node.parent = None;
        node.left = None;
        node.right = None;
        node.prev = None;
        node.next = None;
        node.red = false;
        self.free.push(id);
        self.len -= 1;
    }

    fn rotate_left(&mut self, p: NodeId) {
        let q = self.nodes[p].right.expect("rotate_left needs a right child");
        let parent = self.nodes[p].parent;
        match parent {
            Some(g) if self.nodes[g].left == Some(p) => self.nodes[g].left = Some(q),
            Some(g) => self.nodes[g].right = Some(q),
            None => self.root = Some(q),
        }
        self.nodes[q].parent = parent;
        self.nodes[p].parent = Some(q);
        self.nodes[p].right = self.nodes[q].left;
        if let Some(r) = self.nodes[p].right {
            self.nodes[r].parent = Some(p);
        }
        self.nodes[q].left = Some(p);
    }

    fn rotate_right(&mut self, p: NodeId) {
        let q = self.nodes[p].left.expect("rotate_right needs a left child");
        let parent = self.nodes[p].parent;
        match parent {
            Some(g) if self.nodes[g].left == Some(p) => self.nodes[g].left = Some(q),
            Some(g) => self.nodes[g].right = Some(q),
            None => self.root = Some(q),
        }
        self.nodes[q].parent = parent;
        self.nodes[p].parent = Some(q);
        self.nodes[p].left = self.nodes[q].right;
        if let Some(l) = self.nodes[p].left {
            self.nodes[l].parent = Some(p);
        }
        self.nodes[q].right = Some(p);
    }
}
