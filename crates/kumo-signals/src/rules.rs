//! Rule table.
//!
//! Every rule reads the previous sample with `<=`/`>=` and the current
//! sample strictly, so a crossing fires once, on the bar where the strict
//! inequality first holds.
//!
//! Evaluators return `None` when any value they reference is undefined.
//! The engine uses that to skip a whole tick instead of comparing against
//! missing data.

use kumo_core::{Evidence, SignalKind};
use kumo_indicators::IchimokuSnapshot;

/// Outcome of a rule whose inputs were all defined.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Quiet,
    Fired(Evidence),
}

impl Evaluation {
    pub fn is_fired(&self) -> bool {
        matches!(self, Evaluation::Fired(_))
    }
}

/// Rule evaluator. The flag is the TK cloud filter.
pub type Evaluator = fn(&IchimokuSnapshot, bool) -> Option<Evaluation>;

/// One entry of the rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub kind: SignalKind,
    pub evaluate: Evaluator,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("kind", &self.kind).finish()
    }
}

/// All rules, in evaluation order.
pub static RULES: [Rule; 6] = [
    Rule {
        kind: SignalKind::TkCrossUp,
        evaluate: tk_cross_up,
    },
    Rule {
        kind: SignalKind::TkCrossDown,
        evaluate: tk_cross_down,
    },
    Rule {
        kind: SignalKind::KumoBreakoutUp,
        evaluate: kumo_breakout_up,
    },
    Rule {
        kind: SignalKind::KumoBreakoutDown,
        evaluate: kumo_breakout_down,
    },
    Rule {
        kind: SignalKind::ChikouCrossUp,
        evaluate: chikou_cross_up,
    },
    Rule {
        kind: SignalKind::ChikouCrossDown,
        evaluate: chikou_cross_down,
    },
];

fn evidence(values: &[(&str, Option<f64>)]) -> Evidence {
    values
        .iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
        .collect()
}

fn fired_if(condition: bool, values: &[(&str, Option<f64>)]) -> Evaluation {
    if condition {
        Evaluation::Fired(evidence(values))
    } else {
        Evaluation::Quiet
    }
}

/// Tenkan crosses above Kijun; with the filter, close must be at or above the cloud.
fn tk_cross_up(snapshot: &IchimokuSnapshot, cloud_filter: bool) -> Option<Evaluation> {
    let (cur, prev) = (&snapshot.current, &snapshot.previous);
    let (tenkan, kijun) = (cur.tenkan?, cur.kijun?);
    let (prev_tenkan, prev_kijun) = (prev.tenkan?, prev.kijun?);
    let above_cloud = if cloud_filter {
        cur.close? >= cur.cloud_top?
    } else {
        true
    };

    let cross = prev_tenkan <= prev_kijun && tenkan > kijun;
    Some(fired_if(
        cross && above_cloud,
        &[
            ("tenkan", Some(tenkan)),
            ("kijun", Some(kijun)),
            ("cloud_top", cur.cloud_top),
        ],
    ))
}

/// Tenkan crosses below Kijun; with the filter, close must be at or below the cloud.
fn tk_cross_down(snapshot: &IchimokuSnapshot, cloud_filter: bool) -> Option<Evaluation> {
    let (cur, prev) = (&snapshot.current, &snapshot.previous);
    let (tenkan, kijun) = (cur.tenkan?, cur.kijun?);
    let (prev_tenkan, prev_kijun) = (prev.tenkan?, prev.kijun?);
    let below_cloud = if cloud_filter {
        cur.close? <= cur.cloud_bottom?
    } else {
        true
    };

    let cross = prev_tenkan >= prev_kijun && tenkan < kijun;
    Some(fired_if(
        cross && below_cloud,
        &[
            ("tenkan", Some(tenkan)),
            ("kijun", Some(kijun)),
            ("cloud_bottom", cur.cloud_bottom),
        ],
    ))
}

fn kumo_breakout_up(snapshot: &IchimokuSnapshot, _cloud_filter: bool) -> Option<Evaluation> {
    let (cur, prev) = (&snapshot.current, &snapshot.previous);
    let (close, cloud_top) = (cur.close?, cur.cloud_top?);
    let (prev_close, prev_cloud_top) = (prev.close?, prev.cloud_top?);

    Some(fired_if(
        prev_close <= prev_cloud_top && close > cloud_top,
        &[("cloud_top", Some(cloud_top))],
    ))
}

fn kumo_breakout_down(snapshot: &IchimokuSnapshot, _cloud_filter: bool) -> Option<Evaluation> {
    let (cur, prev) = (&snapshot.current, &snapshot.previous);
    let (close, cloud_bottom) = (cur.close?, cur.cloud_bottom?);
    let (prev_close, prev_cloud_bottom) = (prev.close?, prev.cloud_bottom?);

    Some(fired_if(
        prev_close >= prev_cloud_bottom && close < cloud_bottom,
        &[("cloud_bottom", Some(cloud_bottom))],
    ))
}

// Both chikou values are compared against the previous bar's close, not the
// close at the bar the chikou is plotted on.

fn chikou_cross_up(snapshot: &IchimokuSnapshot, _cloud_filter: bool) -> Option<Evaluation> {
    let chikou = snapshot.current.chikou?;
    let prev_chikou = snapshot.previous.chikou?;
    let ref_close = snapshot.previous.close?;

    Some(fired_if(
        prev_chikou <= ref_close && chikou > ref_close,
        &[("chikou", Some(chikou)), ("ref_close", Some(ref_close))],
    ))
}

fn chikou_cross_down(snapshot: &IchimokuSnapshot, _cloud_filter: bool) -> Option<Evaluation> {
    let chikou = snapshot.current.chikou?;
    let prev_chikou = snapshot.previous.chikou?;
    let ref_close = snapshot.previous.close?;

    Some(fired_if(
        prev_chikou >= ref_close && chikou < ref_close,
        &[("chikou", Some(chikou)), ("ref_close", Some(ref_close))],
    ))
}

/// Look up the table entry for `kind`.
pub fn rule_for(kind: SignalKind) -> &'static Rule {
    match kind {
        SignalKind::TkCrossUp => &RULES[0],
        SignalKind::TkCrossDown => &RULES[1],
        SignalKind::KumoBreakoutUp => &RULES[2],
        SignalKind::KumoBreakoutDown => &RULES[3],
        SignalKind::ChikouCrossUp => &RULES[4],
        SignalKind::ChikouCrossDown => &RULES[5],
    }
}
