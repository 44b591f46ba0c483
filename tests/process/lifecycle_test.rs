/*!
 * Process Lifecycle Tests
 * State machine enforcement and destruction
 */

use lottery_sched::{
    LotteryScheduler, ProcessError, ProcessRegistry, ProcessState, SchedulerRegistry,
};
use pretty_assertions::assert_eq;

fn ready_process() -> (ProcessRegistry, SchedulerRegistry, u32) {
    let mut schedulers = SchedulerRegistry::new();
    let mut reg = ProcessRegistry::new();
    let pid = reg.create(None);
    reg.set_status(pid, ProcessState::Ready, &mut schedulers).unwrap();
    (reg, schedulers, pid)
}

#[test]
fn test_running_transitions_succeed() {
    let (mut reg, mut sch, pid) = ready_process();

    reg.set_status(pid, ProcessState::Running, &mut sch).unwrap();
    assert_eq!(reg.set_status(pid, ProcessState::Ready, &mut sch), Ok(pid));

    reg.set_status(pid, ProcessState::Running, &mut sch).unwrap();
    assert_eq!(reg.set_status(pid, ProcessState::Waiting, &mut sch), Ok(pid));

    assert_eq!(reg.set_status(pid, ProcessState::Ready, &mut sch), Ok(pid));
}

#[test]
fn test_ready_to_waiting_fails() {
    let (mut reg, mut sch, pid) = ready_process();

    let result = reg.set_status(pid, ProcessState::Waiting, &mut sch);
    assert!(matches!(result, Err(ProcessError::InvalidTransition { .. })));
    assert_eq!(reg.get(pid).unwrap().status(), ProcessState::Ready);
}

#[test]
fn test_initializing_to_running_fails() {
    let mut sch = SchedulerRegistry::new();
    let mut reg = ProcessRegistry::new();
    let pid = reg.create(None);

    assert!(reg.set_status(pid, ProcessState::Running, &mut sch).is_err());
    assert_eq!(reg.get(pid).unwrap().status(), ProcessState::Initializing);
}

#[test]
fn test_no_transition_back_to_initializing() {
    let (mut reg, mut sch, pid) = ready_process();
    assert!(reg
        .set_status(pid, ProcessState::Initializing, &mut sch)
        .is_err());
}

#[test]
fn test_destroyed_pid_never_traversed() {
    let lottery = LotteryScheduler::with_seed(5);
    let mut sch = SchedulerRegistry::new();
    lottery.install(&mut sch).unwrap();

    let mut reg = ProcessRegistry::new();
    let pids: Vec<u32> = (0..5).map(|_| reg.create(None)).collect();
    for &pid in &pids {
        lottery.bind(&mut sch, reg.get_mut(pid).unwrap(), 10).unwrap();
        reg.set_status(pid, ProcessState::Ready, &mut sch).unwrap();
    }

    assert!(reg.destroy(pids[2], &mut sch));

    assert!(reg.iter().all(|p| p.pid() != pids[2]));
    assert!(reg.get(pids[2]).is_none());
    assert_eq!(reg.find_by_slot(0), Some(pids[4]));

    // Later draws never land on the destroyed process
    for _ in 0..100 {
        let chosen = sch.schedule(&mut reg).unwrap();
        assert_ne!(chosen, pids[2]);
    }
    assert_eq!(lottery.total_tickets(), 50 - 10);
}

#[test]
fn test_destroy_then_create_uses_fresh_pid() {
    let mut sch = SchedulerRegistry::new();
    let mut reg = ProcessRegistry::new();
    let a = reg.create(None);
    let b = reg.create(None);
    reg.destroy(b, &mut sch);

    let c = reg.create(Some(a));
    assert_eq!(c, 3);
    assert_eq!(reg.pids(), vec![c, a]);
}
