/*!
 * Lottery Property Tests
 * Range coverage, draw uniqueness and transfer conservation
 */

use lottery_sched::{
    LotteryScheduler, Pid, ProcessRegistry, ProcessState, SchedParams, SchedulerRegistry, Tickets,
};
use proptest::prelude::*;
use std::ops::Range;

fn populate(
    tickets: &[Tickets],
    ready: &[bool],
) -> (LotteryScheduler, SchedulerRegistry, ProcessRegistry, Vec<Pid>) {
    let lottery = LotteryScheduler::with_seed(0);
    let mut schedulers = SchedulerRegistry::new();
    lottery.install(&mut schedulers).unwrap();
    let mut processes = ProcessRegistry::new();

    let pids = tickets
        .iter()
        .zip(ready)
        .map(|(&t, &is_ready)| {
            let pid = processes.create(None);
            lottery
                .bind(&mut schedulers, processes.get_mut(pid).unwrap(), t)
                .unwrap();
            if is_ready {
                processes
                    .set_status(pid, ProcessState::Ready, &mut schedulers)
                    .unwrap();
            }
            pid
        })
        .collect();

    (lottery, schedulers, processes, pids)
}

fn ready_ranges(processes: &ProcessRegistry) -> Vec<(Pid, Tickets, Range<Tickets>)> {
    processes
        .iter()
        .filter(|p| p.is_ready())
        .filter_map(|p| {
            let params = p.scheduler_params().and_then(SchedParams::as_lottery)?;
            Some((p.pid(), params.tickets(), params.range()))
        })
        .collect()
}

proptest! {
    #[test]
    fn ranges_exactly_cover_total(
        tickets in prop::collection::vec(0u64..40, 1..8),
        ready in prop::collection::vec(any::<bool>(), 8),
    ) {
        let (lottery, _schedulers, mut processes, _) = populate(&tickets, &ready);
        lottery.invalidate();
        lottery.refresh(&mut processes);

        let total = lottery.total_tickets();
        let mut ranges = ready_ranges(&processes);
        ranges.sort_by_key(|(_, _, r)| (r.start, r.end));

        let mut cursor = 0;
        for (_, count, range) in &ranges {
            prop_assert_eq!(range.start, cursor);
            prop_assert_eq!(range.end - range.start, *count);
            cursor = range.end;
        }
        prop_assert_eq!(cursor, total);
    }

    #[test]
    fn every_draw_has_exactly_one_owner(
        tickets in prop::collection::vec(0u64..30, 1..8),
        ready in prop::collection::vec(any::<bool>(), 8),
    ) {
        let (lottery, _schedulers, mut processes, _) = populate(&tickets, &ready);
        lottery.invalidate();
        lottery.refresh(&mut processes);
        let ranges = ready_ranges(&processes);

        for draw in 0..lottery.total_tickets() {
            let owners: Vec<Pid> = ranges
                .iter()
                .filter(|(_, _, r)| r.contains(&draw))
                .map(|(pid, _, _)| *pid)
                .collect();
            prop_assert_eq!(owners.len(), 1);
            prop_assert_eq!(lottery.schedule_with_draw(&mut processes, draw), Some(owners[0]));
        }
    }

    #[test]
    fn incremental_ranges_are_disjoint(
        tickets in prop::collection::vec(0u64..30, 1..8),
    ) {
        let ready = vec![true; tickets.len()];
        let (lottery, _schedulers, mut processes, _) = populate(&tickets, &ready);
        prop_assert!(!lottery.ranges_stale());

        let total = lottery.total_tickets();
        prop_assert_eq!(total, tickets.iter().sum::<u64>());
        for draw in 0..total {
            prop_assert!(lottery.schedule_with_draw(&mut processes, draw).is_some());
        }
    }

    #[test]
    fn transfer_conserves_tickets(
        src_tickets in 0u64..1_000,
        dst_tickets in 0u64..1_000,
        amount in 0u64..2_000,
    ) {
        let (lottery, _schedulers, mut processes, pids) =
            populate(&[src_tickets, dst_tickets], &[true, true]);
        let (src, dst) = (pids[0], pids[1]);

        let moved = lottery.transfer_tickets(&mut processes, src, dst, amount).unwrap();

        prop_assert!(moved <= src_tickets);
        prop_assert_eq!(moved, amount.min(src_tickets));
        let after = lottery.tickets(&processes, src).unwrap()
            + lottery.tickets(&processes, dst).unwrap();
        prop_assert_eq!(after, src_tickets + dst_tickets);
        prop_assert!(lottery.ranges_stale());
    }
}
