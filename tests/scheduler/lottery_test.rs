/*!
 * Lottery Scheduler Tests
 * Draw resolution, ticket transfers and the empty-lottery guard
 */

use lottery_sched::{
    LotteryScheduler, Pid, ProcessRegistry, ProcessState, SchedParams, SchedulerError,
    SchedulerRegistry, SchedulingAlgorithm, Tickets,
};
use pretty_assertions::assert_eq;

struct Fixture {
    lottery: LotteryScheduler,
    schedulers: SchedulerRegistry,
    processes: ProcessRegistry,
}

impl Fixture {
    fn new(seed: u64) -> Self {
        let lottery = LotteryScheduler::with_seed(seed);
        let mut schedulers = SchedulerRegistry::new();
        lottery.install(&mut schedulers).unwrap();
        Self {
            lottery,
            schedulers,
            processes: ProcessRegistry::new(),
        }
    }

    fn spawn(&mut self, tickets: Tickets) -> Pid {
        let pid = self.processes.create(None);
        self.lottery
            .bind(
                &mut self.schedulers,
                self.processes.get_mut(pid).unwrap(),
                tickets,
            )
            .unwrap();
        pid
    }

    fn spawn_ready(&mut self, tickets: Tickets) -> Pid {
        let pid = self.spawn(tickets);
        self.processes
            .set_status(pid, ProcessState::Ready, &mut self.schedulers)
            .unwrap();
        pid
    }
}

#[test]
fn test_single_process_wins_every_draw() {
    let mut fx = Fixture::new(1);
    let a = fx.spawn_ready(100);

    for draw in 0..100 {
        assert_eq!(fx.lottery.schedule_with_draw(&mut fx.processes, draw), Some(a));
    }
    assert_eq!(fx.schedulers.schedule(&mut fx.processes), Some(a));
    assert_eq!(fx.processes.get(a).unwrap().status(), ProcessState::Running);
    assert_eq!(fx.processes.get(a).unwrap().cpu_usage(), 1);
}

#[test]
fn test_two_processes_split_draws_by_tickets() {
    let mut fx = Fixture::new(2);
    let a = fx.spawn_ready(100);
    let b = fx.spawn_ready(300);

    assert_eq!(fx.lottery.total_tickets(), 400);
    for draw in 0..100 {
        assert_eq!(fx.lottery.schedule_with_draw(&mut fx.processes, draw), Some(a));
    }
    for draw in 100..400 {
        assert_eq!(fx.lottery.schedule_with_draw(&mut fx.processes, draw), Some(b));
    }
    assert_eq!(fx.lottery.schedule_with_draw(&mut fx.processes, 400), None);
}

#[test]
fn test_transfer_more_than_balance() {
    let mut fx = Fixture::new(3);
    let a = fx.spawn_ready(100);
    let b = fx.spawn_ready(300);

    let moved = fx
        .lottery
        .transfer_tickets(&mut fx.processes, a, b, 150)
        .unwrap();

    assert_eq!(moved, 100);
    assert_eq!(fx.lottery.tickets(&fx.processes, a), Some(0));
    assert_eq!(fx.lottery.tickets(&fx.processes, b), Some(400));

    // After the rebuild, a holds an empty range and b takes every draw
    for draw in 0..400 {
        assert_eq!(fx.lottery.schedule_with_draw(&mut fx.processes, draw), Some(b));
    }
    assert_eq!(fx.lottery.total_tickets(), 400);
}

#[test]
fn test_no_ready_process_returns_none() {
    let mut fx = Fixture::new(4);
    assert_eq!(fx.lottery.schedule(&mut fx.processes), None);
    assert_eq!(fx.schedulers.schedule(&mut fx.processes), None);

    // Bound but never admitted
    fx.spawn(100);
    assert_eq!(fx.schedulers.schedule(&mut fx.processes), None);
    assert_eq!(fx.schedulers.stats().idle, 2);
}

#[test]
fn test_waiting_process_drops_out_of_lottery() {
    let mut fx = Fixture::new(5);
    let a = fx.spawn_ready(100);
    let b = fx.spawn_ready(100);

    let first = fx.schedulers.schedule(&mut fx.processes).unwrap();
    fx.processes
        .set_status(first, ProcessState::Waiting, &mut fx.schedulers)
        .unwrap();
    let other = if first == a { b } else { a };

    for _ in 0..20 {
        assert_eq!(fx.schedulers.schedule(&mut fx.processes), Some(other));
    }
    assert_eq!(fx.processes.get(other).unwrap().cpu_usage(), 20);
    assert_eq!(fx.lottery.total_tickets(), 100);
}

#[test]
fn test_seeded_draws_are_reproducible() {
    let run = |seed| {
        let mut fx = Fixture::new(seed);
        for tickets in [10, 20, 30, 40] {
            fx.spawn_ready(tickets);
        }
        (0..50)
            .map(|_| fx.schedulers.schedule(&mut fx.processes))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn test_selection_roughly_follows_tickets() {
    let mut fx = Fixture::new(6);
    let small = fx.spawn_ready(10);
    let large = fx.spawn_ready(90);

    let mut small_wins = 0;
    let mut large_wins = 0;
    for _ in 0..2000 {
        match fx.schedulers.schedule(&mut fx.processes) {
            Some(pid) if pid == small => small_wins += 1,
            Some(pid) if pid == large => large_wins += 1,
            other => panic!("unexpected pick {:?}", other),
        }
    }

    assert!(large_wins > small_wins * 3);
    assert!(small_wins > 0);
}

#[test]
fn test_replacing_params_in_place_keeps_draws_covered() {
    let mut fx = Fixture::new(12);
    let a = fx.spawn_ready(100);
    let slot = fx.lottery.slot().unwrap();

    fx.schedulers
        .bind_process(fx.processes.get_mut(a).unwrap(), SchedParams::lottery(300), slot)
        .unwrap();
    assert!(fx.lottery.ranges_stale());

    for _ in 0..50 {
        assert_eq!(fx.schedulers.schedule(&mut fx.processes), Some(a));
    }
    assert_eq!(fx.lottery.tickets(&fx.processes, a), Some(300));
    assert_eq!(fx.schedulers.stats().idle, 0);
}

#[test]
fn test_unregister_then_reinstall() {
    let mut fx = Fixture::new(13);
    let a = fx.spawn_ready(100);
    let b = fx.spawn_ready(100);
    let slot = fx.lottery.slot().unwrap();
    fx.processes
        .set_status(a, ProcessState::Running, &mut fx.schedulers)
        .unwrap();

    assert_eq!(fx.schedulers.unregister(slot, "LOTT", &mut fx.processes), Ok(slot));
    for pid in [a, b] {
        let process = fx.processes.get(pid).unwrap();
        assert_eq!(process.scheduler_slot(), None);
        assert!(process.scheduler_params().is_none());
    }

    // Status changes while unbound are fine and reach nobody
    fx.processes
        .set_status(a, ProcessState::Waiting, &mut fx.schedulers)
        .unwrap();

    assert_eq!(fx.lottery.install(&mut fx.schedulers), Ok(slot));
    assert!(fx.lottery.ranges_stale());
    assert_eq!(
        fx.lottery.install(&mut fx.schedulers),
        Err(SchedulerError::AlreadyInstalled(slot))
    );

    fx.lottery
        .bind(&mut fx.schedulers, fx.processes.get_mut(b).unwrap(), 100)
        .unwrap();
    assert_eq!(fx.lottery.schedule_with_draw(&mut fx.processes, 0), Some(b));
    assert_eq!(fx.lottery.total_tickets(), 100);
    for _ in 0..200 {
        assert_eq!(fx.schedulers.schedule(&mut fx.processes), Some(b));
    }
}
