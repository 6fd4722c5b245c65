//! Modelo de WashJob
//!
//! Este módulo contiene el ciclo de vida de un lavado: el modelo de tres
//! timestamps, el estado derivado y el cálculo de duraciones. El estado
//! nunca se persiste; se deriva siempre de los timestamps para evitar
//! divergencias entre la columna y la realidad.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado derivado de un lavado.
///
/// Progresión estricta de tres estados: Queued -> InBay -> Finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WashStatus {
    Queued,
    InBay,
    Finished,
}

impl WashStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WashStatus::Queued => "queued",
            WashStatus::InBay => "in_bay",
            WashStatus::Finished => "finished",
        }
    }
}

/// Lavado - mapea a la tabla wash_jobs
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WashJob {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub arrived_at: DateTime<Utc>,
    pub bay_entered_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub external_staff_id: Option<Uuid>,
    pub internal_staff_id: Option<Uuid>,
    pub note: Option<String>,
}

impl WashJob {
    /// Derivar el estado a partir de los dos timestamps opcionales.
    ///
    /// `completed_at` manda: un lavado con salida registrada está Finished
    /// aunque nunca se haya registrado la entrada a pista.
    pub fn status(&self) -> WashStatus {
        match (self.completed_at, self.bay_entered_at) {
            (Some(_), _) => WashStatus::Finished,
            (None, Some(_)) => WashStatus::InBay,
            (None, None) => WashStatus::Queued,
        }
    }

    /// Tiempo en fila: entrada a pista - llegada
    pub fn queue_duration(&self) -> Option<Duration> {
        self.bay_entered_at.map(|bay| bay - self.arrived_at)
    }

    /// Tiempo en pista: salida - entrada a pista
    pub fn bay_duration(&self) -> Option<Duration> {
        match (self.bay_entered_at, self.completed_at) {
            (Some(bay), Some(completed)) => Some(completed - bay),
            _ => None,
        }
    }

    /// Tiempo total: salida - llegada
    pub fn total_duration(&self) -> Option<Duration> {
        self.completed_at.map(|completed| completed - self.arrived_at)
    }

    /// Registrar la entrada a pista y los colaboradores asignados.
    ///
    /// Sobrescribe `bay_entered_at` sin chequear el estado actual y asigna
    /// los slots de colaboradores directamente: pasar `None` limpia el slot.
    pub fn enter_bay(
        &mut self,
        at: DateTime<Utc>,
        external_staff_id: Option<Uuid>,
        internal_staff_id: Option<Uuid>,
    ) {
        self.bay_entered_at = Some(at);
        self.external_staff_id = external_staff_id;
        self.internal_staff_id = internal_staff_id;
    }

    /// Registrar la salida. Sobrescribe `completed_at` sin precondiciones.
    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.completed_at = Some(at);
    }

    /// Clave de ordenamiento del worklist: ascendente por salida, entrada a
    /// pista y llegada, con nulls primero (`None < Some`). Los lavados sin
    /// terminar quedan arriba y dentro de cada etapa gana el que llegó antes.
    pub fn worklist_key(
        &self,
    ) -> (
        Option<DateTime<Utc>>,
        Option<DateTime<Utc>>,
        DateTime<Utc>,
    ) {
        (self.completed_at, self.bay_entered_at, self.arrived_at)
    }
}

/// Formatear una duración como `H:MM` (horas sin padding, minutos a dos
/// dígitos), truncando a segundos enteros. `None` o negativa -> `0:00`.
pub fn format_duration(duration: Option<Duration>) -> String {
    let total_seconds = match duration {
        Some(d) => d.num_seconds(),
        None => 0,
    };

    if total_seconds <= 0 {
        return "0:00".to_string();
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    format!("{}:{:02}", hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn job(
        bay_entered_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
    ) -> WashJob {
        WashJob {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            arrived_at: Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap(),
            bay_entered_at,
            completed_at,
            external_staff_id: None,
            internal_staff_id: None,
            note: None,
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_status_derivation_table() {
        assert_eq!(job(None, None).status(), WashStatus::Queued);
        assert_eq!(job(Some(at(8, 20)), None).status(), WashStatus::InBay);
        assert_eq!(
            job(Some(at(8, 20)), Some(at(9, 10))).status(),
            WashStatus::Finished
        );
        // completed_at manda aunque nunca haya entrado a pista
        assert_eq!(job(None, Some(at(9, 10))).status(), WashStatus::Finished);
    }

    #[test]
    fn test_durations() {
        let j = job(Some(at(8, 20)), Some(at(9, 10)));
        assert_eq!(j.queue_duration(), Some(Duration::minutes(20)));
        assert_eq!(j.bay_duration(), Some(Duration::minutes(50)));
        assert_eq!(j.total_duration(), Some(Duration::minutes(70)));
    }

    #[test]
    fn test_durations_undefined_while_incomplete() {
        let queued = job(None, None);
        assert_eq!(queued.queue_duration(), None);
        assert_eq!(queued.bay_duration(), None);
        assert_eq!(queued.total_duration(), None);

        let in_bay = job(Some(at(8, 20)), None);
        assert_eq!(in_bay.queue_duration(), Some(Duration::minutes(20)));
        assert_eq!(in_bay.bay_duration(), None);
        assert_eq!(in_bay.total_duration(), None);
    }

    #[test]
    fn test_enter_bay_then_complete_finishes() {
        let mut j = job(None, None);
        let external = Uuid::new_v4();

        j.enter_bay(at(8, 20), Some(external), None);
        assert_eq!(j.status(), WashStatus::InBay);
        assert_eq!(j.external_staff_id, Some(external));
        assert_eq!(j.internal_staff_id, None);

        j.complete(at(9, 10));
        assert_eq!(j.status(), WashStatus::Finished);
        assert_eq!(j.bay_duration(), Some(Duration::minutes(50)));
    }

    #[test]
    fn test_enter_bay_overwrites_and_clears_staff() {
        let mut j = job(Some(at(8, 20)), None);
        j.external_staff_id = Some(Uuid::new_v4());

        // re-entrada sobrescribe el timestamp y limpia los slots no enviados
        j.enter_bay(at(8, 40), None, Some(Uuid::new_v4()));
        assert_eq!(j.bay_entered_at, Some(at(8, 40)));
        assert_eq!(j.external_staff_id, None);
        assert!(j.internal_staff_id.is_some());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(None), "0:00");
        assert_eq!(format_duration(Some(Duration::seconds(0))), "0:00");
        assert_eq!(format_duration(Some(Duration::minutes(125))), "2:05");
        assert_eq!(format_duration(Some(Duration::minutes(-5))), "0:00");
        assert_eq!(format_duration(Some(Duration::seconds(59))), "0:00");
        assert_eq!(format_duration(Some(Duration::seconds(3659))), "1:00");
        assert_eq!(format_duration(Some(Duration::hours(11))), "11:00");
    }
}
