//! Route tree types and structural edits.
//!
//! Every edit consumes the value it edits and returns the replacement.
//! Callers rebind their handle to the result; nothing is mutated in place.
//!
//! Dropping and comparing a [`Route`] use an explicit worklist, so a long
//! series costs heap rather than call stack. `Clone` and `Debug` are
//! derived and recurse once per node.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::Computer;

/// One node of a route.
///
/// ```text
///            _____top______
///           /              \
/// -computer-<              >-following-
///           \____bottom____/
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteNode {
    /// End of the route.
    #[default]
    Empty,
    /// A computer, then the rest of the route.
    Series(RouteSeries),
    /// A binary fork that reconverges into a shared continuation.
    Split(RouteSplit),
}

/// A computer followed by the rest of the route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSeries {
    pub computer: Computer,
    pub following: Box<Route>,
}

/// A fork into two alternative sub-routes.
///
/// `top` and `bottom` are alternatives; `following` is the continuation
/// shared by both and is owned independently of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSplit {
    pub top: Box<Route>,
    pub bottom: Box<Route>,
    pub following: Box<Route>,
}

impl RouteSeries {
    /// Create a series node.
    pub fn new(computer: Computer, following: Route) -> Self {
        Self {
            computer,
            following: Box::new(following),
        }
    }

    /// Drop this computer, leaving whatever followed it.
    pub fn remove_computer(self) -> RouteNode {
        (*self.following).into_node()
    }

    /// Put `computer` in series before this one.
    pub fn add_computer_before(self, computer: Computer) -> RouteNode {
        RouteNode::Series(RouteSeries::new(computer, Route::from_node(self.into())))
    }

    /// Put `computer` after this one but before the rest of the route.
    pub fn add_computer_after(self, computer: Computer) -> RouteNode {
        let inserted = RouteSeries::new(computer, *self.following);
        RouteNode::Series(RouteSeries::new(
            self.computer,
            Route::from_node(inserted.into()),
        ))
    }

    /// Put an empty split before this computer.
    ///
    /// The whole series, this computer included, becomes the split's
    /// `following`.
    pub fn add_empty_branch_before(self) -> RouteNode {
        RouteNode::Split(RouteSplit::empty_before(Route::from_node(self.into())))
    }

    /// Put an empty split between this computer and the rest of the route.
    pub fn add_empty_branch_after(self) -> RouteNode {
        let split = RouteSplit::empty_before(*self.following);
        RouteNode::Series(RouteSeries::new(
            self.computer,
            Route::from_node(split.into()),
        ))
    }
}

impl RouteSplit {
    /// Create a split node.
    pub fn new(top: Route, bottom: Route, following: Route) -> Self {
        Self {
            top: Box::new(top),
            bottom: Box::new(bottom),
            following: Box::new(following),
        }
    }

    /// A split with empty branches leading into `following`.
    pub fn empty_before(following: Route) -> Self {
        Self::new(Route::new(), Route::new(), following)
    }

    /// Remove the fork, leaving only the continuation.
    ///
    /// Both branches are discarded along with every computer on them.
    pub fn remove_branch(self) -> RouteNode {
        (*self.following).into_node()
    }
}

impl From<RouteSeries> for RouteNode {
    fn from(series: RouteSeries) -> Self {
        RouteNode::Series(series)
    }
}

impl From<RouteSplit> for RouteNode {
    fn from(split: RouteSplit) -> Self {
        RouteNode::Split(split)
    }
}

// Read as one flat object rather than through serde's internally tagged
// enum support, which buffers the whole subtree before decoding it. Each
// child is then read straight from the underlying deserializer, so a
// stack-growing wrapper around it covers every level.
impl<'de> Deserialize<'de> for RouteNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "snake_case")]
        enum Kind {
            Empty,
            Series,
            Split,
        }

        #[derive(Deserialize)]
        struct Helper {
            kind: Kind,
            computer: Option<Computer>,
            #[serde(default)]
            top: Box<Route>,
            #[serde(default)]
            bottom: Box<Route>,
            #[serde(default)]
            following: Box<Route>,
        }

        let helper = Helper::deserialize(deserializer)?;
        Ok(match helper.kind {
            Kind::Empty => RouteNode::Empty,
            Kind::Series => RouteNode::Series(RouteSeries {
                computer: helper
                    .computer
                    .ok_or_else(|| D::Error::missing_field("computer"))?,
                following: helper.following,
            }),
            Kind::Split => RouteNode::Split(RouteSplit {
                top: helper.top,
                bottom: helper.bottom,
                following: helper.following,
            }),
        })
    }
}

impl RouteNode {
    /// Returns the series if this node is one.
    pub fn as_series(&self) -> Option<&RouteSeries> {
        match self {
            RouteNode::Series(series) => Some(series),
            _ => None,
        }
    }

    /// Returns the split if this node is one.
    pub fn as_split(&self) -> Option<&RouteSplit> {
        match self {
            RouteNode::Split(split) => Some(split),
            _ => None,
        }
    }
}

/// Handle on a route: the entry point for edits and walks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    node: RouteNode,
}

impl Route {
    /// An empty route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing node.
    pub fn from_node(node: RouteNode) -> Self {
        Self { node }
    }

    /// The head node.
    pub fn node(&self) -> &RouteNode {
        &self.node
    }

    /// Unwrap into the head node.
    pub fn into_node(mut self) -> RouteNode {
        std::mem::take(&mut self.node)
    }

    /// Returns true if the route has nothing on it.
    pub fn is_empty(&self) -> bool {
        matches!(self.node, RouteNode::Empty)
    }

    /// The computer at the head of the route, if the head is a series.
    ///
    /// This is all a virus gets to see of a branch before choosing it.
    pub fn first_computer(&self) -> Option<&Computer> {
        self.node.as_series().map(|series| &series.computer)
    }

    /// A new route with `computer` before everything currently on it.
    pub fn add_computer_before(self, computer: Computer) -> Route {
        Route::from_node(RouteSeries::new(computer, self).into())
    }

    /// A new route with an empty split before everything currently on it.
    pub fn add_empty_branch_before(self) -> Route {
        Route::from_node(RouteSplit::empty_before(self).into())
    }

    /// Every computer on the route.
    ///
    /// A series yields its computer and then its continuation. A split
    /// yields its top branch, then its bottom branch, then its
    /// continuation. This order is independent of any virus.
    pub fn add_all_computers(&self) -> Vec<&Computer> {
        self.computers().collect()
    }

    /// Iterate over every computer on the route, in the same order as
    /// [`Route::add_all_computers`].
    pub fn computers(&self) -> Computers<'_> {
        Computers {
            pending: vec![self],
        }
    }

    /// Number of computers on the route.
    pub fn len(&self) -> usize {
        self.computers().count()
    }
}

/// Iterator over the computers on a route. See [`Route::computers`].
#[derive(Debug, Clone)]
pub struct Computers<'a> {
    pending: Vec<&'a Route>,
}

impl<'a> Iterator for Computers<'a> {
    type Item = &'a Computer;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(route) = self.pending.pop() {
            match &route.node {
                RouteNode::Empty => {}
                RouteNode::Series(series) => {
                    self.pending.push(&series.following);
                    return Some(&series.computer);
                }
                RouteNode::Split(split) => {
                    // Pushed in reverse so top is visited first.
                    self.pending.push(&split.following);
                    self.pending.push(&split.bottom);
                    self.pending.push(&split.top);
                }
            }
        }
        None
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        let mut pending: Vec<(&Route, &Route)> = vec![(self, other)];

        while let Some((left, right)) = pending.pop() {
            match (&left.node, &right.node) {
                (RouteNode::Empty, RouteNode::Empty) => {}
                (RouteNode::Series(a), RouteNode::Series(b)) => {
                    if a.computer != b.computer {
                        return false;
                    }
                    pending.push((&a.following, &b.following));
                }
                (RouteNode::Split(a), RouteNode::Split(b)) => {
                    pending.push((&a.following, &b.following));
                    pending.push((&a.bottom, &b.bottom));
                    pending.push((&a.top, &b.top));
                }
                _ => return false,
            }
        }

        true
    }
}

impl Drop for Route {
    fn drop(&mut self) {
        if self.is_empty() {
            return;
        }

        // Detach every child before it is dropped, so each box is freed
        // holding an empty node.
        let mut pending = vec![std::mem::take(&mut self.node)];
        while let Some(node) = pending.pop() {
            match node {
                RouteNode::Empty => {}
                RouteNode::Series(mut series) => {
                    pending.push(std::mem::take(&mut series.following.node));
                }
                RouteNode::Split(mut split) => {
                    pending.push(std::mem::take(&mut split.top.node));
                    pending.push(std::mem::take(&mut split.bottom.node));
                    pending.push(std::mem::take(&mut split.following.node));
                }
            }
        }
    }
}

impl From<RouteNode> for Route {
    fn from(node: RouteNode) -> Self {
        Route::from_node(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computer(name: &str) -> Computer {
        Computer::new(name, 1.0, 1.0, 1.0).unwrap()
    }

    fn names(route: &Route) -> Vec<&str> {
        route.add_all_computers().into_iter().map(|c| c.name()).collect()
    }

    fn series(route: Route) -> RouteSeries {
        match route.into_node() {
            RouteNode::Series(series) => series,
            other => panic!("expected series, got {:?}", other),
        }
    }

    fn split(route: Route) -> RouteSplit {
        match route.into_node() {
            RouteNode::Split(split) => split,
            other => panic!("expected split, got {:?}", other),
        }
    }

    #[test]
    fn empty_route() {
        let route = Route::new();
        assert!(route.is_empty());
        assert_eq!(route.len(), 0);
        assert!(route.first_computer().is_none());
        assert!(route.add_all_computers().is_empty());
    }

    #[test]
    fn add_computer_before_prepends() {
        let route = Route::new()
            .add_computer_before(computer("b"))
            .add_computer_before(computer("a"));

        assert_eq!(names(&route), vec!["a", "b"]);
        assert_eq!(route.first_computer().unwrap().name(), "a");
    }

    #[test]
    fn add_empty_branch_before_keeps_route_as_following() {
        let original = Route::new().add_computer_before(computer("a"));
        let route = original.clone().add_empty_branch_before();

        let split = split(route);
        assert!(split.top.is_empty());
        assert!(split.bottom.is_empty());
        assert_eq!(*split.following, original);
    }

    #[test]
    fn series_add_computer_before_and_after() {
        let route = Route::new()
            .add_computer_before(computer("c"))
            .add_computer_before(computer("a"));

        let before = Route::from_node(series(route.clone()).add_computer_before(computer("z")));
        assert_eq!(names(&before), vec!["z", "a", "c"]);

        let after = Route::from_node(series(route).add_computer_after(computer("b")));
        assert_eq!(names(&after), vec!["a", "b", "c"]);
    }

    #[test]
    fn series_branch_before_wraps_whole_series() {
        let route = Route::new()
            .add_computer_before(computer("b"))
            .add_computer_before(computer("a"));

        let node = series(route.clone()).add_empty_branch_before();
        let split = node.as_split().unwrap();
        assert_eq!(*split.following, route);
        assert!(split.top.is_empty());
        assert!(split.bottom.is_empty());
    }

    #[test]
    fn series_branch_after_sits_behind_computer() {
        let route = Route::new()
            .add_computer_before(computer("b"))
            .add_computer_before(computer("a"));

        let node = series(route).add_empty_branch_after();
        let head = node.as_series().unwrap();
        assert_eq!(head.computer.name(), "a");

        let split = head.following.node().as_split().unwrap();
        assert!(split.top.is_empty());
        assert!(split.bottom.is_empty());
        assert_eq!(split.following.first_computer().unwrap().name(), "b");
    }

    #[test]
    fn remove_computer_returns_following() {
        let rest = Route::new().add_computer_before(computer("b"));
        let route = rest.clone().add_computer_before(computer("a"));

        let node = series(route).remove_computer();
        assert_eq!(Route::from_node(node), rest);
    }

    #[test]
    fn remove_branch_discards_both_branches() {
        let following = Route::new().add_computer_before(computer("after"));
        let split = RouteSplit::new(
            Route::new().add_computer_before(computer("top")),
            Route::new().add_computer_before(computer("bottom")),
            following.clone(),
        );

        let route = Route::from_node(split.remove_branch());
        assert_eq!(route, following);
        assert_eq!(names(&route), vec!["after"]);
    }

    #[test]
    fn add_all_computers_order() {
        // a -> split(top: t1 -> t2, bottom: b1, following: f1) -> end
        let top = Route::new()
            .add_computer_before(computer("t2"))
            .add_computer_before(computer("t1"));
        let bottom = Route::new().add_computer_before(computer("b1"));
        let following = Route::new().add_computer_before(computer("f1"));
        let route = Route::from_node(RouteSplit::new(top, bottom, following).into())
            .add_computer_before(computer("a"));

        assert_eq!(names(&route), vec!["a", "t1", "t2", "b1", "f1"]);
        assert_eq!(route.len(), 5);
    }

    #[test]
    fn add_all_computers_nested_three_deep() {
        let innermost = RouteSplit::new(
            Route::new().add_computer_before(computer("x")),
            Route::new().add_computer_before(computer("y")),
            Route::new().add_computer_before(computer("z")),
        );
        let middle = RouteSplit::new(
            Route::from_node(innermost.into()),
            Route::new(),
            Route::new().add_computer_before(computer("m")),
        );
        let outer = RouteSplit::new(
            Route::new().add_computer_before(computer("o")),
            Route::from_node(middle.into()),
            Route::new().add_computer_before(computer("end")),
        );
        let route = Route::from_node(outer.into());

        assert_eq!(names(&route), vec!["o", "x", "y", "z", "m", "end"]);
    }

    fn long_series(len: usize) -> Route {
        let mut route = Route::new();
        for i in 0..len {
            route = route.add_computer_before(computer(&i.to_string()));
        }
        route
    }

    #[test]
    fn long_series_does_not_overflow() {
        let route = long_series(200_000);
        assert_eq!(route.len(), 200_000);
        assert_eq!(route.first_computer().unwrap().name(), "199999");
        drop(route);
    }

    #[test]
    fn deep_splits_drop() {
        let mut route = Route::new().add_computer_before(computer("end"));
        for i in 0..100_000 {
            let top = Route::new().add_computer_before(computer(&format!("t{i}")));
            route = Route::from_node(RouteSplit::new(top, Route::new(), route).into());
        }
        assert_eq!(route.len(), 100_001);
        drop(route);
    }

    #[test]
    fn long_series_equality() {
        let a = long_series(200_000);
        let b = long_series(200_000);
        assert!(a == b);

        let shorter = long_series(199_999);
        assert!(a != shorter);

        let renamed = long_series(199_999).add_computer_before(computer("other"));
        assert!(a != renamed);
    }

    #[test]
    fn equality_distinguishes_shape() {
        let series = Route::new().add_computer_before(computer("a"));
        let wrapped = series.clone().add_empty_branch_before();
        assert_ne!(series, wrapped);
        assert_ne!(wrapped, series);

        let top = RouteSplit::new(series.clone(), Route::new(), Route::new());
        let bottom = RouteSplit::new(Route::new(), series.clone(), Route::new());
        assert_ne!(Route::from_node(top.into()), Route::from_node(bottom.into()));
    }

    #[test]
    fn computers_iterates_lazily_in_order() {
        let route = Route::new()
            .add_computer_before(computer("b"))
            .add_empty_branch_before()
            .add_computer_before(computer("a"));

        let mut computers = route.computers();
        assert_eq!(computers.next().unwrap().name(), "a");
        assert_eq!(computers.next().unwrap().name(), "b");
        assert!(computers.next().is_none());
    }

    #[test]
    fn json_shape() {
        let route = Route::new()
            .add_computer_before(computer("a"))
            .add_empty_branch_before();
        let value = serde_json::to_value(&route).unwrap();

        assert_eq!(value["kind"], "split");
        assert_eq!(value["top"]["kind"], "empty");
        assert_eq!(value["following"]["kind"], "series");
        assert_eq!(value["following"]["computer"]["name"], "a");
    }

    #[test]
    fn json_series_requires_computer() {
        let err = serde_json::from_str::<Route>(r#"{"kind":"series"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `computer`"));

        let err = serde_json::from_str::<Route>(r#"{"computer":null}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `kind`"));
    }

    #[test]
    fn json_field_order_does_not_matter() {
        let json = r#"{"following":{"kind":"empty"},"computer":
            {"name":"a","hacking_difficulty":1,"hacked_value":1,"risk_factor":1},
            "kind":"series"}"#;
        let route: Route = serde_json::from_str(json).unwrap();
        assert_eq!(route, Route::new().add_computer_before(computer("a")));
    }

    #[test]
    fn json_missing_children_default_to_empty() {
        let json = r#"{"kind":"split","top":{"kind":"series","computer":
            {"name":"t","hacking_difficulty":1,"hacked_value":1,"risk_factor":1}}}"#;
        let route: Route = serde_json::from_str(json).unwrap();

        let split = route.node().as_split().unwrap();
        assert_eq!(split.top.first_computer().unwrap().name(), "t");
        assert!(split.top.node().as_series().unwrap().following.is_empty());
        assert!(split.bottom.is_empty());
        assert!(split.following.is_empty());
    }
}
