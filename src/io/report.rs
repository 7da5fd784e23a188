//! Text reports of a computed skycube.
//!
//! Formats:
//! - tree: one `<path> : <skyline>` line per subset;
//! - closures: one `<closed paths> : <skyline> : <generator paths>` line per
//!   closure.
//!
//! Paths print as `d0d2`; points as `e<i>`, or as their label when the
//! dataset has labels. Group members are joined by `-`, entries by `,`.

use crate::data::dataset::{Dataset, PointId, Preference};
use crate::engine::{Skycube, Strategy};
use crate::lattice::closure::Closure;
use crate::lattice::path::Path;
use crate::lattice::skyline::SkylineRead;
use crate::skycube_error::SkycubeError;
use itertools::Itertools;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

/// Writer of tree and closure reports.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportWriter;

impl ReportWriter {
    /// Report matching the strategy that ran: closures for depth-first,
    /// the level-ordered tree otherwise.
    pub fn write_result<W: Write>(&self, mut out: W, cube: &Skycube) -> Result<(), SkycubeError> {
        match cube.strategy() {
            Some(Strategy::Depth { .. }) => self.write_closures(&mut out, cube),
            Some(_) => self.write_tree(&mut out, cube),
            None => Err(SkycubeError::InvalidState("no traversal ran on this skycube")),
        }
    }

    /// Every node of the tree, by subset size.
    pub fn write_tree<W: Write>(&self, mut out: W, cube: &Skycube) -> Result<(), SkycubeError> {
        let tree = cube
            .tree()
            .ok_or(SkycubeError::InvalidState("no traversal ran on this skycube"))?;
        for id in tree.level_order() {
            let node = tree.node(id);
            writeln!(
                out,
                "{} : {}",
                node.path(),
                SkylineDisplay::new(cube.dataset(), node.skyline())
            )?;
        }
        Ok(())
    }

    /// Every node of the tree, in pre-order.
    pub fn write_tree_pre_order<W: Write>(
        &self,
        mut out: W,
        cube: &Skycube,
    ) -> Result<(), SkycubeError> {
        let tree = cube
            .tree()
            .ok_or(SkycubeError::InvalidState("no traversal ran on this skycube"))?;
        for (_, node) in tree.pre_order() {
            writeln!(
                out,
                "{} : {}",
                node.path(),
                SkylineDisplay::new(cube.dataset(), node.skyline())
            )?;
        }
        Ok(())
    }

    /// Every closure, in creation order.
    pub fn write_closures<W: Write>(&self, mut out: W, cube: &Skycube) -> Result<(), SkycubeError> {
        for closure in cube.closures().iter() {
            self.write_closure(&mut out, cube.dataset(), closure)?;
        }
        Ok(())
    }

    fn write_closure<W: Write>(
        &self,
        out: &mut W,
        dataset: &Dataset,
        closure: &Closure,
    ) -> Result<(), SkycubeError> {
        writeln!(
            out,
            "{} : {} : {}",
            join_paths(closure.closed_nodes()),
            SkylineDisplay::new(dataset, closure.signature()),
            join_paths(closure.generators())
        )?;
        Ok(())
    }
}

fn join_paths(paths: &[Path]) -> String {
    paths.iter().join(",")
}

/// `Display` adapter printing a skyline in report format.
pub struct SkylineDisplay<'a, S> {
    dataset: &'a Dataset,
    skyline: &'a S,
}

impl<'a, S: SkylineRead> SkylineDisplay<'a, S> {
    pub fn new(dataset: &'a Dataset, skyline: &'a S) -> Self {
        Self { dataset, skyline }
    }

    fn point(&self, p: PointId) -> String {
        match self.dataset.label(p) {
            Some(label) => label.to_owned(),
            None => format!("e{p}"),
        }
    }
}

impl<S: SkylineRead> fmt::Display for SkylineDisplay<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let distinct = self.skyline.distinct().map(|p| self.point(p));
        let groups = self
            .skyline
            .groups()
            .map(|g| g.iter().map(|p| self.point(p)).join("-"));
        write!(f, "{}", distinct.chain(groups).join(","))
    }
}

/// `<input>.<strategy tag>.<l|u per dimension>.res`
pub fn result_path(
    input: impl AsRef<std::path::Path>,
    strategy: Strategy,
    preferences: &[Preference],
) -> PathBuf {
    let mut name = input.as_ref().as_os_str().to_owned();
    name.push(".");
    name.push(strategy.tag());
    name.push(".");
    name.push(preferences.iter().map(|p| p.letter()).collect::<String>());
    name.push(".res");
    PathBuf::from(name)
}
