//! Tests del ciclo de vida de un lavado de punta a punta, sin base de
//! datos: modelo + servicios + parsing de horarios.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use uuid::Uuid;

use carwash_backend::models::wash_job::{format_duration, WashJob, WashStatus};
use carwash_backend::services::clock::{Clock, FixedClock};
use carwash_backend::services::quota_service::{
    check_monthly_quota, month_bounds, QuotaPolicy,
};
use carwash_backend::services::worklist_service::{daily_tally, day_bounds, sort_worklist};
use carwash_backend::utils::validation::{format_local_datetime, parse_local_datetime};

fn business_offset() -> FixedOffset {
    FixedOffset::west_opt(4 * 3600).unwrap()
}

fn new_job(arrived_at: DateTime<Utc>) -> WashJob {
    WashJob {
        id: Uuid::new_v4(),
        vehicle_id: Uuid::new_v4(),
        arrived_at,
        bay_entered_at: None,
        completed_at: None,
        external_staff_id: None,
        internal_staff_id: None,
        note: None,
    }
}

#[test]
fn full_lifecycle_from_wire_timestamps() {
    let offset = business_offset();

    // Llegada 08:00, pista 08:20, salida 09:10 (hora local)
    let arrived = parse_local_datetime("2025-03-10T08:00", offset).unwrap();
    let entered = parse_local_datetime("2025-03-10T08:20", offset).unwrap();
    let completed = parse_local_datetime("2025-03-10T09:10", offset).unwrap();

    let mut job = new_job(arrived);
    assert_eq!(job.status(), WashStatus::Queued);

    let staff = Uuid::new_v4();
    job.enter_bay(entered, Some(staff), None);
    assert_eq!(job.status(), WashStatus::InBay);

    job.complete(completed);
    assert_eq!(job.status(), WashStatus::Finished);

    assert_eq!(job.queue_duration(), Some(Duration::minutes(20)));
    assert_eq!(job.bay_duration(), Some(Duration::minutes(50)));
    assert_eq!(job.total_duration(), Some(Duration::minutes(70)));

    assert_eq!(format_duration(job.queue_duration()), "0:20");
    assert_eq!(format_duration(job.bay_duration()), "0:50");
    assert_eq!(format_duration(job.total_duration()), "1:10");

    // El render de salida devuelve la misma hora local del wire
    assert_eq!(format_local_datetime(job.arrived_at, offset), "2025-03-10T08:00");
}

#[test]
fn completing_without_bay_entry_is_finished() {
    let offset = business_offset();
    let arrived = parse_local_datetime("2025-03-10T08:00", offset).unwrap();
    let completed = parse_local_datetime("2025-03-10T09:00", offset).unwrap();

    let mut job = new_job(arrived);
    job.complete(completed);

    assert_eq!(job.status(), WashStatus::Finished);
    assert_eq!(job.queue_duration(), None);
    assert_eq!(job.bay_duration(), None);
    assert_eq!(job.total_duration(), Some(Duration::minutes(60)));
    assert_eq!(format_duration(job.bay_duration()), "0:00");
}

#[test]
fn fixed_clock_supplies_missing_timestamps() {
    let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 30, 0).unwrap();
    let clock = FixedClock(now);

    let mut job = new_job(clock.now_utc());
    job.enter_bay(clock.now_utc(), None, None);
    job.complete(clock.now_utc());

    assert_eq!(job.status(), WashStatus::Finished);
    assert_eq!(job.total_duration(), Some(Duration::zero()));
}

#[test]
fn worklist_orders_unfinished_first_and_tallies_by_status() {
    let offset = business_offset();
    let base = parse_local_datetime("2025-03-10T08:00", offset).unwrap();

    let mut finished = new_job(base);
    finished.enter_bay(base + Duration::minutes(10), None, None);
    finished.complete(base + Duration::minutes(40));

    let mut in_bay = new_job(base + Duration::minutes(5));
    in_bay.enter_bay(base + Duration::minutes(20), None, None);

    let queued_late = new_job(base + Duration::minutes(30));
    let queued_early = new_job(base + Duration::minutes(15));

    let mut jobs = vec![
        finished.clone(),
        queued_late.clone(),
        in_bay.clone(),
        queued_early.clone(),
    ];
    sort_worklist(&mut jobs);

    // En fila primero (por llegada), después pista, terminados al final
    assert_eq!(jobs[0].id, queued_early.id);
    assert_eq!(jobs[1].id, queued_late.id);
    assert_eq!(jobs[2].id, in_bay.id);
    assert_eq!(jobs[3].id, finished.id);

    let stats = daily_tally(&jobs);
    assert_eq!(stats.total, 4);
    assert_eq!(stats.queued, 2);
    assert_eq!(stats.in_bay, 1);
    assert_eq!(stats.finished, 1);
    assert_eq!(stats.total, stats.queued + stats.in_bay + stats.finished);
}

#[test]
fn day_bounds_cover_the_local_calendar_day() {
    let offset = business_offset();
    // 01:30 UTC del 11 de marzo todavía es 21:30 del 10 en UTC-4
    let now = Utc.with_ymd_and_hms(2025, 3, 11, 1, 30, 0).unwrap();
    let (from, to) = day_bounds(now, offset);

    assert_eq!(from, Utc.with_ymd_and_hms(2025, 3, 10, 4, 0, 0).unwrap());
    assert_eq!(to, Utc.with_ymd_and_hms(2025, 3, 11, 4, 0, 0).unwrap());

    let arrived = parse_local_datetime("2025-03-10T08:00", offset).unwrap();
    assert!(arrived >= from && arrived < to);
}

#[test]
fn monthly_quota_rejects_third_wash_when_enforced() {
    let offset = business_offset();
    let allowance = 2;

    let first = parse_local_datetime("2025-03-03T09:00", offset).unwrap();
    let second = parse_local_datetime("2025-03-17T10:00", offset).unwrap();
    let third = parse_local_datetime("2025-03-28T11:00", offset).unwrap();

    let (from, to) = month_bounds(third, offset);
    let used = [first, second]
        .iter()
        .filter(|at| **at >= from && **at < to)
        .count() as i64;
    assert_eq!(used, 2);

    assert!(check_monthly_quota(QuotaPolicy::Enforced, used, allowance, "ABC1234").is_err());
    assert!(check_monthly_quota(QuotaPolicy::Disabled, used, allowance, "ABC1234").is_ok());

    // En abril el contador arranca de nuevo
    let april = parse_local_datetime("2025-04-02T09:00", offset).unwrap();
    let (april_from, april_to) = month_bounds(april, offset);
    let april_used = [first, second]
        .iter()
        .filter(|at| **at >= april_from && **at < april_to)
        .count() as i64;
    assert_eq!(april_used, 0);
    assert!(check_monthly_quota(QuotaPolicy::Enforced, april_used, allowance, "ABC1234").is_ok());
}

#[test]
fn malformed_wire_timestamp_is_rejected() {
    let offset = business_offset();
    assert!(parse_local_datetime("2025-03-10 08:00", offset).is_err());
    assert!(parse_local_datetime("10/03/2025T08:00", offset).is_err());
    assert!(parse_local_datetime("", offset).is_err());
}
