use crate::errors::{Error, Result};

/// Enumerates the types of stack frames
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameType {
    /// The view or component the render started from
    Origin,
    /// A `@component` being expanded
    Component,
    /// A layout wrapping already rendered content
    Layout,
}

/// Entry in the call stack
#[derive(Debug)]
pub struct StackFrame {
    /// Type of stack frame
    pub kind: FrameType,
    /// Name of the template rendered in this frame
    pub name: String,
}

/// Keeps track of the templates being rendered so component recursion stays bounded
#[derive(Debug)]
pub struct CallStack {
    stack: Vec<StackFrame>,
    max_depth: usize,
}

impl CallStack {
    /// Create the initial call stack
    pub fn new(kind: FrameType, name: &str, max_depth: usize) -> CallStack {
        CallStack { stack: vec![StackFrame { kind, name: name.to_string() }], max_depth }
    }

    /// Pushes a component frame, failing if that goes over the maximum depth
    pub fn push_component_frame(&mut self, name: &str) -> Result<()> {
        if self.depth() >= self.max_depth {
            return Err(Error::recursion_limit(name, self.max_depth));
        }
        self.stack.push(StackFrame { kind: FrameType::Component, name: name.to_string() });
        Ok(())
    }

    /// Pop the last frame, never the first one
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Number of nested components currently being rendered
    pub fn depth(&self) -> usize {
        self.stack.iter().filter(|f| f.kind == FrameType::Component).count()
    }

    /// Returns immutable reference to current `StackFrame`
    pub fn current_frame(&self) -> &StackFrame {
        // the first frame is never popped
        &self.stack[self.stack.len() - 1]
    }

    /// `pages/home > components/card > ...`, for log messages
    pub fn trace(&self) -> String {
        self.stack.iter().map(|f| f.name.as_str()).collect::<Vec<_>>().join(" > ")
    }
}
