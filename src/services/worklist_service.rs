//! Servicio de worklist diario
//!
//! Este módulo contiene la lógica pura de la pantalla de acompañamiento:
//! conteo por estado de los lavados del día y el ordenamiento del worklist.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use serde::Serialize;

use crate::models::wash_job::{WashJob, WashStatus};

/// Conteos por estado de un conjunto de lavados de un día.
///
/// Invariante: `queued + in_bay + finished == total` (los estados son
/// mutuamente excluyentes y exhaustivos).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorklistStats {
    pub total: i64,
    pub queued: i64,
    pub in_bay: i64,
    pub finished: i64,
}

/// Contar los lavados de un día por estado derivado
pub fn daily_tally(jobs: &[WashJob]) -> WorklistStats {
    let mut stats = WorklistStats {
        total: jobs.len() as i64,
        queued: 0,
        in_bay: 0,
        finished: 0,
    };

    for job in jobs {
        match job.status() {
            WashStatus::Queued => stats.queued += 1,
            WashStatus::InBay => stats.in_bay += 1,
            WashStatus::Finished => stats.finished += 1,
        }
    }

    stats
}

/// Ordenar el worklist: ascendente por (salida, entrada a pista, llegada),
/// con nulls primero. Los lavados sin terminar quedan antes que los
/// terminados y dentro de cada etapa gana el que llegó primero.
pub fn sort_worklist(jobs: &mut [WashJob]) {
    jobs.sort_by_key(|job| job.worklist_key());
}

/// Límites UTC del día calendario local que contiene a `now`
pub fn day_bounds(now: DateTime<Utc>, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_date = now.with_timezone(&offset).date_naive();
    let start_naive = local_date.and_hms_opt(0, 0, 0).unwrap();
    // FixedOffset no tiene transiciones, la conversión siempre es única
    let start = offset
        .from_local_datetime(&start_naive)
        .unwrap()
        .with_timezone(&Utc);
    (start, start + Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use uuid::Uuid;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, h, m, 0).unwrap()
    }

    fn job(
        arrived_at: DateTime<Utc>,
        bay_entered_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
    ) -> WashJob {
        WashJob {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            arrived_at,
            bay_entered_at,
            completed_at,
            external_staff_id: None,
            internal_staff_id: None,
            note: None,
        }
    }

    #[test]
    fn test_daily_tally_counts_and_invariant() {
        let jobs = vec![
            job(at(8, 0), None, None),
            job(at(8, 5), Some(at(8, 20)), None),
            job(at(8, 10), Some(at(8, 25)), Some(at(9, 0))),
            job(at(8, 15), None, None),
        ];

        let stats = daily_tally(&jobs);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.queued, 2);
        assert_eq!(stats.in_bay, 1);
        assert_eq!(stats.finished, 1);
        assert_eq!(stats.queued + stats.in_bay + stats.finished, stats.total);
    }

    #[test]
    fn test_daily_tally_empty() {
        let stats = daily_tally(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.queued + stats.in_bay + stats.finished, 0);
    }

    #[test]
    fn test_sort_worklist_nulls_first() {
        // mismo horario de llegada, etapas distintas
        let queued = job(at(8, 0), None, None);
        let in_bay = job(at(8, 0), Some(at(8, 20)), None);
        let finished = job(at(8, 0), Some(at(8, 20)), Some(at(9, 0)));

        let mut jobs = vec![finished.clone(), in_bay.clone(), queued.clone()];
        sort_worklist(&mut jobs);

        assert_eq!(jobs[0].id, queued.id);
        assert_eq!(jobs[1].id, in_bay.id);
        assert_eq!(jobs[2].id, finished.id);
    }

    #[test]
    fn test_sort_worklist_arrival_order_within_stage() {
        let first = job(at(7, 0), None, None);
        let second = job(at(8, 0), None, None);
        let third = job(at(9, 0), None, None);

        let mut jobs = vec![second.clone(), third.clone(), first.clone()];
        sort_worklist(&mut jobs);

        assert_eq!(jobs[0].id, first.id);
        assert_eq!(jobs[1].id, second.id);
        assert_eq!(jobs[2].id, third.id);
    }

    #[test]
    fn test_day_bounds_respects_offset() {
        let offset = FixedOffset::west_opt(4 * 3600).unwrap();
        // 01:30 UTC del 2 de enero son las 21:30 locales del 1 de enero
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 1, 30, 0).unwrap();
        let (start, end) = day_bounds(now, offset);

        assert_eq!(start, Utc.with_ymd_and_hms(2025, 1, 1, 4, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 2, 4, 0, 0).unwrap());
        assert_eq!(start.with_timezone(&offset).hour(), 0);
    }
}
