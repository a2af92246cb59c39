use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Service {
    pub service_id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub price: Decimal,
    pub fitness_center_id: Uuid,
    pub created_at: chrono::NaiveDateTime,
}

impl Service {
    pub fn duration(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::minutes(i64::from(self.duration_minutes))
    }

    /// When a session of this service starting at `start` ends, or `None`
    /// when that lies past the last representable date.
    pub fn end_for(&self, start: chrono::NaiveDateTime) -> Option<chrono::NaiveDateTime> {
        start.checked_add_signed(self.duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn service(duration_minutes: i32) -> Service {
        Service {
            service_id: Uuid::new_v4(),
            name: "Personal training".to_string(),
            duration_minutes,
            price: Decimal::new(4500, 2),
            fitness_center_id: Uuid::new_v4(),
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_end_adds_duration() {
        let start = NaiveDate::from_ymd_opt(2025, 12, 10)
            .unwrap()
            .and_hms_opt(23, 30, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 12, 11)
            .unwrap()
            .and_hms_opt(0, 30, 0)
            .unwrap();
        assert_eq!(service(60).end_for(start), Some(end));
    }

    #[test]
    fn test_end_past_last_date_is_none() {
        let start = NaiveDateTime::MAX - chrono::TimeDelta::minutes(30);
        assert_eq!(service(60).end_for(start), None);
        assert!(service(30).end_for(start).is_some());
    }
}
