//! ## hemvakt-core::tree
//! **Multi-way tree addressed by payload value**
//!
//! Every node owns its children in order; there is no parent link, parents
//! are found by searching from the root. All lookups compare payloads, so
//! when the same value appears in several places the first pre-order match
//! (root first, children left to right) is the one acted on.
//!
//! Invariants:
//! - siblings under one parent have distinct payloads
//! - the root is the only node without a parent
//! - no node is its own descendant

use std::fmt::{self, Display, Write};

use tracing::{debug, trace};

use crate::error::{ContainerError, Missing};

const INDENT: &str = "    ";

/// Index path from the root: `[]` is the root, `[1, 0]` its second child's
/// first child.
type Path = Vec<usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    data: T,
    children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            children: Vec::new(),
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn children(&self) -> &[TreeNode<T>] {
        &self.children
    }

    /// Consumes the node, keeping its payload.
    pub fn into_data(self) -> T {
        self.data
    }

    /// Pre-order walk of this subtree with depths relative to this node.
    pub fn walk(&self) -> Walk<'_, T> {
        Walk {
            stack: vec![(0, self)],
        }
    }

    /// One line per node, indented by depth.
    pub fn render(&self) -> String
    where
        T: Display,
    {
        let mut out = String::new();
        for (depth, node) in self.walk() {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "{}- {}", INDENT.repeat(depth), node.data);
        }
        out
    }

    fn child_index(&self, data: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.children.iter().position(|child| child.data == *data)
    }

    fn path_to(&self, data: &T, path: &mut Path) -> bool
    where
        T: PartialEq,
    {
        if self.data == *data {
            return true;
        }
        for (index, child) in self.children.iter().enumerate() {
            path.push(index);
            if child.path_to(data, path) {
                return true;
            }
            path.pop();
        }
        false
    }
}

/// Pre-order iterator yielding `(depth, node)`.
pub struct Walk<'a, T> {
    stack: Vec<(usize, &'a TreeNode<T>)>,
}

impl<'a, T> Iterator for Walk<'a, T> {
    type Item = (usize, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiwayTree<T> {
    root: TreeNode<T>,
}

impl<T: PartialEq> MultiwayTree<T> {
    /// Creates a tree holding only `root`.
    pub fn new(root: T) -> Self {
        Self {
            root: TreeNode::new(root),
        }
    }

    pub fn root(&self) -> &TreeNode<T> {
        &self.root
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.root.walk().count()
    }

    /// A tree always has its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// First node in pre-order whose payload equals `data`.
    pub fn find(&self, data: &T) -> Option<&TreeNode<T>> {
        self.root
            .walk()
            .map(|(_, node)| node)
            .find(|node| node.data == *data)
    }

    /// Appends `child` under the node found for `parent`.
    ///
    /// # Errors
    ///
    /// - `NotFound(Parent)` when no node holds `parent`
    /// - `DuplicateKey` when `parent` already has a child equal to `child`
    pub fn add_child(&mut self, parent: &T, child: T) -> Result<(), ContainerError> {
        let path = self
            .locate(parent)
            .ok_or(ContainerError::NotFound(Missing::Parent))?;
        let node = self.node_at_mut(&path);
        if node.child_index(&child).is_some() {
            return Err(ContainerError::DuplicateKey);
        }
        node.children.push(TreeNode::new(child));
        trace!(depth = path.len() + 1, "tree child added");
        Ok(())
    }

    /// Detaches the first child of `parent` equal to `child`, subtree and
    /// all. Remaining siblings keep their order.
    ///
    /// # Errors
    ///
    /// `NotFound(Parent)` or `NotFound(Child)`.
    pub fn remove_child(&mut self, parent: &T, child: &T) -> Result<TreeNode<T>, ContainerError> {
        let path = self
            .locate(parent)
            .ok_or(ContainerError::NotFound(Missing::Parent))?;
        let node = self.node_at_mut(&path);
        let index = node
            .child_index(child)
            .ok_or(ContainerError::NotFound(Missing::Child))?;
        trace!(depth = path.len() + 1, "tree child removed");
        Ok(node.children.remove(index))
    }

    /// Moves `child`, with its whole subtree, from `current_parent` to the end
    /// of `new_parent`'s children.
    ///
    /// Both parents are resolved before anything is detached, so a failed
    /// move leaves the tree as it was.
    ///
    /// # Errors
    ///
    /// - `NotFound(CurrentParent | NewParent | BothParents)`
    /// - `NotFound(Child)` when `current_parent` has no such child
    /// - `WouldCycle` when `new_parent` lies inside the moved subtree
    /// - `DuplicateKey` when `new_parent` already has an equal child
    pub fn move_child(
        &mut self,
        child: &T,
        current_parent: &T,
        new_parent: &T,
    ) -> Result<(), ContainerError> {
        let (from, mut to) = match (self.locate(current_parent), self.locate(new_parent)) {
            (Some(from), Some(to)) => (from, to),
            (None, Some(_)) => return Err(ContainerError::NotFound(Missing::CurrentParent)),
            (Some(_), None) => return Err(ContainerError::NotFound(Missing::NewParent)),
            (None, None) => return Err(ContainerError::NotFound(Missing::BothParents)),
        };

        let index = self
            .node_at(&from)
            .child_index(child)
            .ok_or(ContainerError::NotFound(Missing::Child))?;

        let mut moved = from.clone();
        moved.push(index);
        if to.starts_with(&moved) {
            return Err(ContainerError::WouldCycle);
        }
        if from != to && self.node_at(&to).child_index(child).is_some() {
            return Err(ContainerError::DuplicateKey);
        }

        let subtree = self.node_at_mut(&from).children.remove(index);
        // A later sibling of the moved node shifts left by one.
        if to.len() > from.len() && to.starts_with(&from) && to[from.len()] > index {
            to[from.len()] -= 1;
        }
        self.node_at_mut(&to).children.push(subtree);
        debug!(from = ?from, to = ?to, "tree subtree moved");
        Ok(())
    }

    /// Rendering of the subtree rooted at the first node equal to `data`.
    pub fn render_subtree(&self, data: &T) -> Option<String>
    where
        T: Display,
    {
        self.find(data).map(TreeNode::render)
    }

    /// Rendering of the whole tree.
    pub fn render(&self) -> String
    where
        T: Display,
    {
        self.root.render()
    }

    pub fn walk(&self) -> Walk<'_, T> {
        self.root.walk()
    }

    fn locate(&self, data: &T) -> Option<Path> {
        let mut path = Vec::new();
        self.root.path_to(data, &mut path).then_some(path)
    }

    fn node_at(&self, path: &[usize]) -> &TreeNode<T> {
        path.iter()
            .fold(&self.root, |node, &index| &node.children[index])
    }

    fn node_at_mut(&mut self, path: &[usize]) -> &mut TreeNode<T> {
        path.iter()
            .fold(&mut self.root, |node, &index| &mut node.children[index])
    }
}

impl<T: Display + PartialEq> Display for MultiwayTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
