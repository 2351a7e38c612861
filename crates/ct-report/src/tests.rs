//! Tests for ct-report.

use ct_core::{BoundingBox, Coord, HostAddress};
use ct_sim::HostStore;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn h(n: u32) -> HostAddress {
    HostAddress(n)
}

/// A 100x100 world with hosts 0, 1 and 2.  Host 0 is a bystander so that
/// the contact under test runs between addresses 1 and 2.
fn world(a: Coord, b: Coord) -> HostStore {
    let mut hosts = HostStore::new(BoundingBox::from_bounds(0.0, 100.0, 0.0, 100.0));
    hosts.add("n0", Coord::new(50.0, 50.0)).unwrap();
    hosts.add("A", a).unwrap();
    hosts.add("B", b).unwrap();
    hosts
}

#[cfg(test)]
mod record_tests {
    use super::*;
    use crate::{ContactRecord, EnvelopeContact, PositionsContact};
    use std::collections::HashSet;

    #[test]
    fn reversed_pairs_are_equal() {
        let pos = (Coord::new(0.0, 0.0), Coord::new(1.0, 1.0));
        let ab = PositionsContact::new(h(1), h(2), 3.0, pos);
        let ba = PositionsContact::new(h(2), h(1), 7.0, pos);
        assert_eq!(ab, ba);
        assert_eq!(ab.pair(), ba.pair());

        let mut set = HashSet::new();
        set.insert(ab);
        assert!(!set.insert(ba));

        let ab = EnvelopeContact::new(h(1), h(2), 3.0, pos);
        let ba = EnvelopeContact::new(h(2), h(1), 3.0, pos);
        assert_eq!(ab, ba);
        let mut set = HashSet::new();
        set.insert(ab);
        assert!(set.contains(&ba));
    }

    #[test]
    fn different_pairs_differ() {
        let pos = (Coord::default(), Coord::default());
        let ab = EnvelopeContact::new(h(1), h(2), 0.0, pos);
        let ac = EnvelopeContact::new(h(1), h(3), 0.0, pos);
        assert_ne!(ab, ac);
    }

    #[test]
    fn update_only_on_movement() {
        let p1 = Coord::new(5.0, 5.0);
        let p2 = Coord::new(7.0, 9.0);
        let mut c = PositionsContact::new(h(1), h(2), 10.0, (p1, p2));

        assert!(!c.update((p1, p2)));
        assert_eq!(c.last_reported(), (p1, p2));

        let moved = Coord::new(7.0, 10.0);
        assert!(c.update((p1, moved)));
        assert_eq!(c.last_reported(), (p1, moved));
        assert!(!c.update((p1, moved)));
    }

    #[test]
    fn positions_line_keeps_record_order() {
        let c = PositionsContact::new(h(2), h(1), 10.7, (Coord::new(1.5, 2.0), Coord::new(3.0, 4.0)));
        assert_eq!(c.report_line((Coord::new(1.5, 2.0), Coord::new(3.0, 4.0))), "2;1;10;1.5;2;3;4");
    }

    #[test]
    fn connection_end_sets_time() {
        let pos = (Coord::default(), Coord::default());
        let mut c = PositionsContact::new(h(1), h(2), 1.0, pos);
        assert!(c.is_live());
        assert_eq!(c.end_time(), None);
        c.connection_end(4.0);
        assert!(!c.is_live());
        assert_eq!(c.end_time(), Some(4.0));
        assert_eq!(c.to_string(), "1<->2 [1-4]");
    }

    #[test]
    fn display_end_at_time_zero_reads_na() {
        let pos = (Coord::default(), Coord::default());
        let mut c = PositionsContact::new(h(1), h(2), 0.0, pos);
        c.connection_end(0.0);
        assert_eq!(c.end_time(), Some(0.0));
        assert_eq!(c.to_string(), "1<->2 [0-n/a]");

        let mut c = EnvelopeContact::new(h(1), h(2), 0.0, pos);
        c.connection_end(0.0, pos);
        assert_eq!(c.to_string(), "1<->2 [0-n/a]");
    }

    #[test]
    fn envelope_span_and_line() {
        let mut c = EnvelopeContact::new(h(1), h(2), 5.0, (Coord::new(10.0, 10.0), Coord::new(20.0, 20.0)));
        assert_eq!(c.to_string(), "1<->2 [5-n/a]");
        assert_eq!(c.span().into_parts(), (5, 5, 0));

        c.connection_end(8.0, (Coord::new(30.0, 40.0), Coord::new(25.0, 15.0)));
        assert_eq!(c.span().into_parts(), (5, 8, 3));
        assert_eq!(
            c.report_line(&BoundingBox::from_bounds(0.0, 100.0, 0.0, 100.0)),
            "5;8;3;1;2;POLYGON((10 10, 10 40, 30 40, 30 10, 10 10))"
        );
    }

    #[test]
    fn envelope_line_is_translated_by_scenario_origin() {
        let mut c = EnvelopeContact::new(h(1), h(2), 0.0, (Coord::new(1.0, 1.0), Coord::new(2.0, 2.0)));
        c.connection_end(1.0, (Coord::new(1.0, 1.0), Coord::new(2.0, 2.0)));
        let line = c.report_line(&BoundingBox::from_bounds(10.0, 20.0, -5.0, 5.0));
        assert_eq!(line, "0;1;1;1;2;POLYGON((11 -4, 11 -3, 12 -3, 12 -4, 11 -4))");
    }

    #[test]
    fn duration_truncates_exact_difference() {
        let pos = (Coord::default(), Coord::default());
        let mut c = EnvelopeContact::new(h(1), h(2), 1.6, pos);
        c.connection_end(3.4, pos);
        // end - start = 1.8
        assert_eq!(c.span().into_parts(), (1, 3, 1));
    }
}

#[cfg(test)]
mod index_tests {
    use super::*;
    use crate::{ContactIndex, PositionsContact};

    fn contact(a: u32, b: u32) -> PositionsContact {
        PositionsContact::new(h(a), h(b), 0.0, (Coord::default(), Coord::default()))
    }

    #[test]
    fn lookup_in_either_order() {
        let mut idx = ContactIndex::new();
        idx.add(contact(1, 2));
        assert!(idx.contains(h(1), h(2)));
        assert!(idx.contains(h(2), h(1)));
        assert_eq!(idx.get(h(2), h(1)).map(|c| c.h1()), Some(h(1)));
        assert_eq!(idx.len(), 1);

        let removed = idx.remove(h(2), h(1)).unwrap();
        assert_eq!((removed.h1(), removed.h2()), (h(1), h(2)));
        assert!(idx.is_empty());
        assert!(idx.remove(h(1), h(2)).is_none());
    }

    #[test]
    fn one_record_per_pair() {
        let mut idx = ContactIndex::new();
        idx.add(contact(1, 2));
        idx.add(contact(1, 3));
        idx.add(contact(3, 2));
        assert_eq!(idx.len(), 3);
        assert_eq!(idx.values().count(), 3);
    }

    #[test]
    #[should_panic(expected = "already contained a contact of 1 and 2")]
    fn duplicate_pair_panics() {
        let mut idx = ContactIndex::new();
        idx.add(contact(1, 2));
        idx.add(contact(2, 1));
    }
}

#[cfg(test)]
mod base_tests {
    use crate::{ReportBase, ReportError};
    use ct_output::{MemoryWriter, OutputError};

    #[test]
    fn warmup_window() {
        let base = ReportBase::new(MemoryWriter::new(), 10.0).unwrap();
        assert!(base.is_warmup(0.0));
        assert!(base.is_warmup(9.99));
        assert!(!base.is_warmup(10.0));
        assert!(!base.is_warmup(11.0));
    }

    #[test]
    fn zero_warmup_never_skips() {
        let base = ReportBase::new(MemoryWriter::new(), 0.0).unwrap();
        assert!(!base.is_warmup(0.0));
    }

    #[test]
    fn negative_warmup_rejected() {
        let err = ReportBase::new(MemoryWriter::new(), -1.0).err().unwrap();
        assert!(matches!(err, ReportError::Invalid(_)));
    }

    #[test]
    fn done_is_idempotent_and_writes_after_it_fail() {
        let mut base = ReportBase::new(MemoryWriter::new(), 0.0).unwrap();
        base.write("a");
        base.new_event();
        base.done();
        base.done();
        assert!(base.is_done());
        assert_eq!(base.lines_written(), 1);
        assert_eq!(base.event_count(), 1);
        assert!(base.take_error().is_none());

        base.write("b");
        assert!(matches!(base.take_error(), Some(OutputError::Finished)));
        assert!(base.take_error().is_none());
        assert_eq!(base.into_writer().lines(), ["a"]);
    }
}

#[cfg(test)]
mod positions_tests {
    use super::*;
    use crate::{ContactsPositionsReport, ReportError};
    use ct_core::Settings;
    use ct_output::MemoryWriter;
    use ct_sim::{SimContext, SimListener};

    fn report(granularity: f64, warmup: f64) -> ContactsPositionsReport<MemoryWriter> {
        ContactsPositionsReport::new(MemoryWriter::new(), granularity, warmup).unwrap()
    }

    fn lines(r: ContactsPositionsReport<MemoryWriter>) -> Vec<String> {
        r.into_writer().into_lines()
    }

    #[test]
    fn stationary_pair_writes_once() {
        let hosts = world(Coord::new(5.0, 5.0), Coord::new(7.0, 9.0));
        let mut r = report(1.0, 0.0);

        r.hosts_connected(&SimContext::new(10.0, &hosts), h(1), h(2));
        r.updated(&SimContext::new(11.0, &hosts));

        assert_eq!(lines(r), ["10;1;2;10;5;5;7;9"]);
    }

    #[test]
    fn moving_endpoint_writes_at_tick() {
        let mut hosts = world(Coord::new(5.0, 5.0), Coord::new(7.0, 9.0));
        let mut r = report(1.0, 0.0);

        r.hosts_connected(&SimContext::new(10.0, &hosts), h(1), h(2));
        hosts.set_location(h(2), Coord::new(7.0, 10.0)).unwrap();
        r.updated(&SimContext::new(11.0, &hosts));

        assert_eq!(lines(r), ["10;1;2;10;5;5;7;9", "11;1;2;10;5;5;7;10"]);
    }

    #[test]
    fn connect_logs_contact_under_debug_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let hosts = world(Coord::new(5.0, 5.0), Coord::new(7.0, 9.0));
        let mut r = report(1.0, 0.0);

        tracing::subscriber::with_default(subscriber, || {
            r.hosts_connected(&SimContext::new(10.0, &hosts), h(2), h(1));
        });

        assert_eq!(r.connections().get(h(1), h(2)).map(|c| c.h1()), Some(h(2)));
        assert_eq!(lines(r), ["10;2;1;10;7;9;5;5"]);
    }

    #[test]
    fn granularity_grid() {
        let mut hosts = world(Coord::new(0.0, 0.0), Coord::new(1.0, 0.0));
        let mut r = report(2.0, 0.0);
        assert_eq!(r.last_update(), 0.0);

        r.hosts_connected(&SimContext::new(0.0, &hosts), h(1), h(2));

        hosts.set_location(h(2), Coord::new(2.0, 0.0)).unwrap();
        r.updated(&SimContext::new(2.3, &hosts));
        assert!((r.last_update() - 2.0).abs() < 1e-9);

        hosts.set_location(h(2), Coord::new(3.0, 0.0)).unwrap();
        r.updated(&SimContext::new(3.0, &hosts));
        assert!((r.last_update() - 2.0).abs() < 1e-9);

        assert_eq!(lines(r), ["0;1;2;0;0;0;1;0", "2;1;2;0;0;0;2;0"]);
    }

    #[test]
    fn warmup_contact_is_never_reported() {
        let hosts = world(Coord::new(5.0, 5.0), Coord::new(7.0, 9.0));
        let mut r = report(1.0, 10.0);

        r.hosts_connected(&SimContext::new(1.0, &hosts), h(1), h(2));
        assert!(r.connections().is_empty());

        r.updated(&SimContext::new(15.0, &hosts));
        r.hosts_disconnected(&SimContext::new(20.0, &hosts), h(1), h(2));
        assert!(r.connections().is_empty());
        assert_eq!(r.base().event_count(), 1);
        assert!(lines(r).is_empty());
    }

    #[test]
    fn disconnect_in_reverse_order_removes_contact() {
        let mut hosts = world(Coord::new(5.0, 5.0), Coord::new(7.0, 9.0));
        let mut r = report(1.0, 0.0);

        r.hosts_connected(&SimContext::new(10.0, &hosts), h(1), h(2));
        hosts.set_location(h(1), Coord::new(6.0, 5.0)).unwrap();
        r.hosts_disconnected(&SimContext::new(12.0, &hosts), h(2), h(1));

        assert!(r.connections().is_empty());
        // The ended contact is gone before the sweep, so no closing line.
        assert_eq!(lines(r), ["10;1;2;10;5;5;7;9"]);
    }

    #[test]
    fn connect_sweeps_other_contacts() {
        let mut hosts = world(Coord::new(5.0, 5.0), Coord::new(7.0, 9.0));
        let mut r = report(1.0, 0.0);

        r.hosts_connected(&SimContext::new(1.0, &hosts), h(1), h(2));
        hosts.set_location(h(1), Coord::new(6.0, 5.0)).unwrap();
        r.hosts_connected(&SimContext::new(1.5, &hosts), h(0), h(2));

        assert_eq!(
            lines(r),
            ["1;1;2;1;5;5;7;9", "1;1;2;1;6;5;7;9", "1;0;2;1;50;50;7;9"]
        );
    }

    #[test]
    fn updated_counts_active_hosts() {
        let mut hosts = world(Coord::default(), Coord::default());
        hosts.set_active(h(0), false).unwrap();
        let mut r = report(1.0, 0.0);
        r.updated(&SimContext::new(0.0, &hosts));
        assert_eq!(r.nrof_active_nodes(), 2);
    }

    #[test]
    fn non_positive_granularity_rejected() {
        for g in [0.0, -1.0, f64::NAN] {
            let err = ContactsPositionsReport::new(MemoryWriter::new(), g, 0.0).err().unwrap();
            assert!(matches!(err, ReportError::Invalid(_)), "granularity {g}");
        }
    }

    #[test]
    fn from_settings_reads_namespaces() {
        let settings: Settings = "
            [Report]
            warmup = 5
            [ContactsPositionsReport]
            granularity = 2.5
        "
        .parse()
        .unwrap();
        let r = ContactsPositionsReport::from_settings(&settings, MemoryWriter::new()).unwrap();
        assert_eq!(r.granularity(), 2.5);
        assert_eq!(r.base().warmup(), 5.0);

        let r = ContactsPositionsReport::from_settings(&Settings::empty(), MemoryWriter::new()).unwrap();
        assert_eq!(r.granularity(), ContactsPositionsReport::<MemoryWriter>::DEFAULT_GRANULARITY);
        assert_eq!(r.base().warmup(), 0.0);
    }

    #[test]
    fn bad_setting_type_is_config_error() {
        let settings: Settings = "
            [ContactsPositionsReport]
            granularity = \"often\"
        "
        .parse()
        .unwrap();
        let err = ContactsPositionsReport::from_settings(&settings, MemoryWriter::new()).err().unwrap();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn done_finishes_writer() {
        let mut r = report(1.0, 0.0);
        r.done();
        assert!(r.base().is_done());
        assert!(r.take_error().is_none());
        assert!(r.into_writer().is_finished());
    }
}

#[cfg(test)]
mod envelope_tests {
    use super::*;
    use crate::ContactEnvelopeReport;
    use ct_core::Settings;
    use ct_output::MemoryWriter;
    use ct_sim::{SimContext, SimListener};

    fn report(warmup: f64) -> ContactEnvelopeReport<MemoryWriter> {
        ContactEnvelopeReport::new(MemoryWriter::new(), warmup).unwrap()
    }

    #[test]
    fn one_polygon_per_contact() {
        let mut hosts = world(Coord::new(10.0, 10.0), Coord::new(20.0, 20.0));
        let mut r = report(0.0);
        assert!(r.scenario_bounds().is_null());

        r.hosts_connected(&SimContext::new(5.0, &hosts), h(1), h(2));
        assert_eq!(*r.scenario_bounds(), BoundingBox::from_bounds(0.0, 100.0, 0.0, 100.0));
        assert_eq!(r.connections().len(), 1);

        hosts.set_location(h(1), Coord::new(30.0, 40.0)).unwrap();
        hosts.set_location(h(2), Coord::new(25.0, 15.0)).unwrap();
        r.hosts_disconnected(&SimContext::new(8.0, &hosts), h(1), h(2));

        assert!(r.connections().is_empty());
        assert_eq!(
            r.into_writer().into_lines(),
            ["5;8;3;1;2;POLYGON((10 10, 10 40, 30 40, 30 10, 10 10))"]
        );
    }

    #[test]
    fn reversed_disconnect_keeps_connect_order() {
        let hosts = world(Coord::new(1.0, 2.0), Coord::new(3.0, 4.0));
        let mut r = report(0.0);

        r.hosts_connected(&SimContext::new(0.0, &hosts), h(2), h(1));
        r.hosts_disconnected(&SimContext::new(2.0, &hosts), h(1), h(2));

        assert_eq!(
            r.into_writer().into_lines(),
            ["0;2;2;2;1;POLYGON((1 2, 1 4, 3 4, 3 2, 1 2))"]
        );
    }

    #[test]
    fn warmup_contact_is_never_reported() {
        let hosts = world(Coord::new(1.0, 2.0), Coord::new(3.0, 4.0));
        let mut r = report(10.0);

        r.hosts_connected(&SimContext::new(1.0, &hosts), h(1), h(2));
        assert!(r.connections().is_empty());
        assert!(r.scenario_bounds().is_null());

        r.hosts_disconnected(&SimContext::new(20.0, &hosts), h(1), h(2));
        assert_eq!(r.base().event_count(), 1);
        assert!(r.into_writer().lines().is_empty());
    }

    #[test]
    fn updated_is_ignored() {
        let hosts = world(Coord::new(1.0, 2.0), Coord::new(3.0, 4.0));
        let mut r = report(0.0);
        r.hosts_connected(&SimContext::new(0.0, &hosts), h(1), h(2));
        r.updated(&SimContext::new(1.0, &hosts));
        assert!(r.into_writer().lines().is_empty());
    }

    #[test]
    fn from_settings_prefers_own_namespace() {
        let settings: Settings = "
            [Report]
            warmup = 5
            [ContactEnvelopeReport]
            warmup = 7
        "
        .parse()
        .unwrap();
        let r = ContactEnvelopeReport::from_settings(&settings, MemoryWriter::new()).unwrap();
        assert_eq!(r.base().warmup(), 7.0);
    }
}

#[cfg(test)]
mod replay_tests {
    use crate::{ContactEnvelopeReport, ContactsPositionsReport};
    use ct_output::{LineWriter, MemoryWriter, TextFileWriter};
    use ct_sim::{Replay, ScenarioConfig, Trace};

    const TRACE: &str = "\
time,event,host,peer,x,y
0,move,0,,50,50
0,move,1,,5,5
0,move,2,,7,9
10,up,1,2,,
11,move,2,,7,10
13,down,2,1,,
";

    fn config() -> ScenarioConfig {
        ScenarioConfig {
            bounds: Some(ct_core::BoundingBox::from_bounds(0.0, 100.0, 0.0, 100.0)),
            ..ScenarioConfig::default()
        }
    }

    #[test]
    fn both_reports_from_one_replay() {
        let trace = Trace::from_reader(TRACE.as_bytes()).unwrap();
        let mut replay = Replay::new(config(), trace).unwrap();

        let mut positions = ContactsPositionsReport::new(MemoryWriter::new(), 1.0, 0.0).unwrap();
        let mut envelope = ContactEnvelopeReport::new(MemoryWriter::new(), 0.0).unwrap();
        replay.run(&mut (&mut positions, &mut envelope));

        assert!(positions.take_error().is_none());
        assert!(envelope.take_error().is_none());

        let positions = positions.into_writer();
        assert!(positions.is_finished());
        assert_eq!(positions.lines(), ["10;1;2;10;5;5;7;9", "11;1;2;10;5;5;7;10"]);

        let envelope = envelope.into_writer();
        assert!(envelope.is_finished());
        assert_eq!(
            envelope.lines(),
            ["10;13;3;1;2;POLYGON((5 5, 5 10, 7 10, 7 5, 5 5))"]
        );
    }

    #[test]
    fn report_to_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("ContactEnvelopeReport.txt");

        let trace = Trace::from_reader(TRACE.as_bytes()).unwrap();
        let mut replay = Replay::new(config(), trace).unwrap();
        let mut envelope =
            ContactEnvelopeReport::new(TextFileWriter::create(&path).unwrap(), 0.0).unwrap();
        replay.run(&mut envelope);
        assert!(envelope.take_error().is_none());

        let mut writer = envelope.into_writer();
        // Already finished by done().
        writer.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "10;13;3;1;2;POLYGON((5 5, 5 10, 7 10, 7 5, 5 5))\n");
    }
}
