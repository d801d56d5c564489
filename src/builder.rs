use trellis::CstNode;

const ROOT: &str = "<root>";

/// The stack of in-progress CST nodes. The bottom frame is a synthetic
/// root that only ever receives the entry rule's node; the top frame is
/// the open parent that terminal matches and finished sub-rules attach
/// to.
pub struct Builder {
    stack: Vec<CstNode>
}

impl Builder {
    pub fn new() -> Builder {
        Builder { stack: vec![CstNode::branch(ROOT)] }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn open_children(&self) -> usize {
        self.current().children.len()
    }

    pub fn current(&self) -> &CstNode {
        self.stack.last().expect("builder stack never empty")
    }

    pub fn enter(&mut self, name: &'static str) {
        self.stack.push(CstNode::branch(name));
    }

    /// Close the open node, derive its span from its children, and
    /// attach it to the enclosing frame.
    pub fn exit(&mut self) {
        debug_assert!(self.stack.len() > 1);
        let mut node = self.stack.pop().expect("builder stack never empty");
        node.loc = node.loc_from_children();
        self.attach(node);
    }

    /// Drop the open node without attaching it (rule failure).
    pub fn abandon(&mut self) {
        debug_assert!(self.stack.len() > 1);
        self.stack.pop();
    }

    pub fn attach(&mut self, node: CstNode) {
        self.stack
            .last_mut()
            .expect("builder stack never empty")
            .children
            .push(node);
    }

    /// Roll back to a checkpoint: discard frames opened since, and any
    /// children the surviving open frame gained since.
    pub fn truncate(&mut self, depth: usize, children: usize) {
        debug_assert!(depth >= 1 && depth <= self.stack.len());
        self.stack.truncate(depth);
        let top = self.stack.last_mut().expect("builder stack never empty");
        top.children.truncate(children);
    }

    /// Tear down the root frame. Returns the entry rule's node, or
    /// `None` if the frame does not hold exactly one node.
    pub fn finish(mut self) -> Option<CstNode> {
        if self.stack.len() != 1 {
            return None;
        }
        let root = self.stack.pop()?;
        if root.children.len() != 1 {
            return None;
        }
        root.children.into_iter().next()
    }
}
