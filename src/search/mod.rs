//! Generic best-first (A*) search over an abstract weighted graph.
//!
//! The engine knows nothing about the nodes it searches; a [`SearchSpace`]
//! supplies the edges, the goal predicate and an optimistic estimate of the
//! remaining cost. [`AStar`] is an iterator yielding every path that reaches a
//! goal, cheapest first. It does not stop at the first goal: pulling another
//! item keeps searching, and dropping the iterator cancels the search.

pub mod heap_dict;

pub use heap_dict::{Exhausted, HeapDict};

use crate::costs::Cost;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

/// One outgoing edge of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<N, T> {
    pub cost: Cost,
    pub transition: T,
    pub node: N,
}

impl<N, T> Edge<N, T> {
    pub fn new(cost: impl Into<Cost>, transition: T, node: N) -> Self {
        Edge {
            cost: cost.into(),
            transition,
            node,
        }
    }
}

/// The graph the engine searches.
///
/// `estimate` must never overestimate the cost to the nearest goal, and must
/// be consistent along every edge; otherwise paths may come out of order.
pub trait SearchSpace {
    type Node: Clone + Eq + Hash;
    type Transition: Clone;

    fn expand(&self, node: &Self::Node) -> Vec<Edge<Self::Node, Self::Transition>>;

    fn is_goal(&self, node: &Self::Node) -> bool;

    fn estimate(&self, _node: &Self::Node) -> Cost {
        Cost::default()
    }
}

/// A node reached by a path, with the cumulative cost of getting there.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<N, T> {
    pub cost: Cost,
    pub transition: T,
    pub node: N,
}

/// A completed path from the initial node (exclusive) to a goal node.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<N, T> {
    steps: Vec<Step<N, T>>,
}

impl<N, T> Path<N, T> {
    /// Steps in the order they are taken.
    pub fn steps(&self) -> &[Step<N, T>] {
        &self.steps
    }

    /// Steps from the goal backwards to the first move off the initial node.
    pub fn iter_rev(&self) -> impl Iterator<Item = &Step<N, T>> {
        self.steps.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total cost; zero when the initial node is itself a goal.
    pub fn cost(&self) -> Cost {
        self.steps.last().map(|step| step.cost).unwrap_or_default()
    }

    pub fn goal(&self) -> Option<&N> {
        self.steps.last().map(|step| &step.node)
    }
}

// Predecessor chains share their tails, so recording a path is O(1).
struct Link<N, T> {
    step: Step<N, T>,
    prev: Option<Rc<Link<N, T>>>,
}

type NotifyFn<'s, N> = Box<dyn FnMut(Cost, &N, usize, usize) + 's>;
type EstimateErrorFn<'s, N> = Box<dyn FnMut(&N, Cost, &N, Cost) + 's>;

pub struct AStar<'s, S: SearchSpace> {
    space: &'s S,
    open: HeapDict<S::Node, Cost>,
    closed: HashSet<S::Node>,
    g_score: HashMap<S::Node, Cost>,
    came_from: HashMap<S::Node, Option<Rc<Link<S::Node, S::Transition>>>>,
    // A goal is yielded before it is expanded; expansion resumes on the next pull.
    pending: Option<(S::Node, Cost)>,
    notify: Option<NotifyFn<'s, S::Node>>,
    estimate_error: Option<EstimateErrorFn<'s, S::Node>>,
}

impl<'s, S: SearchSpace> AStar<'s, S> {
    pub fn new(space: &'s S, initial: S::Node) -> Self {
        let mut open = HeapDict::new();
        open.insert(initial.clone(), space.estimate(&initial));
        let mut g_score = HashMap::new();
        g_score.insert(initial.clone(), Cost::default());
        let mut came_from = HashMap::new();
        came_from.insert(initial, None);
        AStar {
            space,
            open,
            closed: HashSet::new(),
            g_score,
            came_from,
            pending: None,
            notify: None,
            estimate_error: None,
        }
    }

    /// Called once per popped node with (f, node, live open entries, heap entries).
    pub fn with_notify(mut self, notify: impl FnMut(Cost, &S::Node, usize, usize) + 's) -> Self {
        self.notify = Some(Box::new(notify));
        self
    }

    /// Called with (x, f(x), y, f(y)) whenever an edge x → y lowers f below
    /// the value x was popped at, i.e. the estimate is not consistent.
    pub fn with_estimate_error_callback(
        mut self,
        callback: impl FnMut(&S::Node, Cost, &S::Node, Cost) + 's,
    ) -> Self {
        self.estimate_error = Some(Box::new(callback));
        self
    }

    fn expand_node(&mut self, x: &S::Node, f: Cost) {
        let g_x = self.g_score.get(x).copied().unwrap_or_default();
        let prev = self.came_from.get(x).cloned().flatten();
        for edge in self.space.expand(x) {
            let y = edge.node;
            if self.closed.contains(&y) {
                continue;
            }
            let tentative = g_x + edge.cost;
            if matches!(self.g_score.get(&y), Some(&old) if tentative > old) {
                continue;
            }
            self.g_score.insert(y.clone(), tentative);
            let link = Link {
                step: Step {
                    cost: tentative,
                    transition: edge.transition,
                    node: y.clone(),
                },
                prev: prev.clone(),
            };
            self.came_from.insert(y.clone(), Some(Rc::new(link)));

            let new_f = tentative + self.space.estimate(&y);
            if new_f < f {
                if let Some(callback) = self.estimate_error.as_mut() {
                    callback(x, f, &y, new_f);
                }
            }
            self.open.insert(y, new_f);
        }
    }

    fn path_to(&self, node: &S::Node) -> Path<S::Node, S::Transition> {
        let mut steps = Vec::new();
        let mut link = self.came_from.get(node).cloned().flatten();
        while let Some(current) = link {
            steps.push(current.step.clone());
            link = current.prev.clone();
        }
        steps.reverse();
        Path { steps }
    }
}

impl<S: SearchSpace> Iterator for AStar<'_, S> {
    type Item = Path<S::Node, S::Transition>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((x, f)) = self.pending.take() {
            self.expand_node(&x, f);
        }
        loop {
            let (x, f) = match self.open.pop() {
                Ok(entry) => entry,
                Err(Exhausted) => return None,
            };
            if !self.closed.insert(x.clone()) {
                continue;
            }
            if let Some(notify) = self.notify.as_mut() {
                notify(f, &x, self.open.len(), self.open.heap_len());
            }
            if self.space.is_goal(&x) {
                let path = self.path_to(&x);
                self.pending = Some((x, f));
                return Some(path);
            }
            self.expand_node(&x, f);
        }
    }
}

impl<S: SearchSpace> fmt::Debug for AStar<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AStar")
            .field("open", &self.open.len())
            .field("closed", &self.closed.len())
            .finish()
    }
}
