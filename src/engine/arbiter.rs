// FlexSonic — Priority Arbitration
//
// The rule table is ordered deployment configuration: first match wins.
// Combos sit ahead of the singles over their fingers (profile validation
// enforces this), and the motion rule sits last so a deliberate finger
// gesture always outranks incidental hand movement.

/// One entry in the priority table, mapping a trigger condition to a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Both flex channels triggered in the same cycle.
    Combo { first: usize, second: usize, track: u16 },
    /// A single flex channel triggered.
    Single { channel: usize, track: u16 },
    /// The gyro-excursion channel triggered.
    Motion { track: u16 },
}

impl Rule {
    pub fn track(&self) -> u16 {
        match *self {
            Rule::Combo { track, .. } | Rule::Single { track, .. } | Rule::Motion { track } => {
                track
            }
        }
    }
}

/// Trigger booleans for one cycle: one per flex channel plus the derived
/// gyro-excursion channel.
#[derive(Debug, Clone, Copy)]
pub struct TriggerSnapshot<'a> {
    pub flex: &'a [bool],
    pub motion: bool,
}

impl TriggerSnapshot<'_> {
    fn flex_triggered(&self, channel: usize) -> bool {
        self.flex.get(channel).copied().unwrap_or(false)
    }
}

/// Walk the rule table in order and return the first matching track.
pub fn arbitrate(rules: &[Rule], snapshot: &TriggerSnapshot) -> Option<u16> {
    for rule in rules {
        let hit = match *rule {
            Rule::Combo { first, second, .. } => {
                snapshot.flex_triggered(first) && snapshot.flex_triggered(second)
            }
            Rule::Single { channel, .. } => snapshot.flex_triggered(channel),
            Rule::Motion { .. } => snapshot.motion,
        };
        if hit {
            return Some(rule.track());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<Rule> {
        vec![
            Rule::Combo { first: 0, second: 1, track: 6 },
            Rule::Combo { first: 2, second: 3, track: 7 },
            Rule::Single { channel: 1, track: 1 },
            Rule::Single { channel: 0, track: 2 },
            Rule::Single { channel: 2, track: 3 },
            Rule::Single { channel: 3, track: 4 },
            Rule::Single { channel: 4, track: 5 },
            Rule::Motion { track: 10 },
        ]
    }

    fn snap(flex: &[bool], motion: bool) -> Option<u16> {
        arbitrate(&table(), &TriggerSnapshot { flex, motion })
    }

    #[test]
    fn single_channel_maps_to_its_own_track() {
        assert_eq!(snap(&[false, true, false, false, false], false), Some(1));
        assert_eq!(snap(&[true, false, false, false, false], false), Some(2));
        assert_eq!(snap(&[false, false, false, false, true], false), Some(5));
    }

    #[test]
    fn combo_outranks_both_member_singles() {
        // Channels 0 and 1 each have their own rule, but together they must
        // resolve to the combo track.
        assert_eq!(snap(&[true, true, false, false, false], false), Some(6));
        assert_eq!(snap(&[false, false, true, true, false], false), Some(7));
    }

    #[test]
    fn earlier_rule_wins_on_overlap() {
        // Three fingers down: combo (0,1) is listed before combo (2,3) and
        // before every single.
        assert_eq!(snap(&[true, true, true, false, false], false), Some(6));
        // Without channel 1, the first match is the channel-0 single — which
        // sits after the channel-1 single in this table.
        assert_eq!(snap(&[true, false, true, false, false], false), Some(2));
    }

    #[test]
    fn motion_yields_to_any_flex_trigger() {
        assert_eq!(snap(&[false, false, false, false, false], true), Some(10));
        assert_eq!(snap(&[false, false, true, false, false], true), Some(3));
    }

    #[test]
    fn no_trigger_means_no_action() {
        assert_eq!(snap(&[false; 5], false), None);
        assert_eq!(arbitrate(&[], &TriggerSnapshot { flex: &[true], motion: true }), None);
    }

    #[test]
    fn combo_needs_both_channels() {
        assert_eq!(snap(&[true, false, false, false, false], false), Some(2));
    }
}
