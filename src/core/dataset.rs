use crate::domain::model::OperationRecord;
use crate::utils::error::{EffortError, Result};
use crate::utils::validation::{validate_country_code, validate_non_empty_string, validate_non_negative};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One month of operations as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthEntry {
    pub label: String,
    #[serde(default)]
    pub operations: Vec<OperationRecord>,
}

/// Months in caller order, each with its operations in caller order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyDataset {
    months: Vec<MonthEntry>,
}

impl MonthlyDataset {
    /// Build a dataset, normalising country codes to upper case.
    ///
    /// Rejects repeated month labels, countries listed twice in one month, and
    /// months whose sortie counts do not fit in a `u64` total.
    pub fn new(months: Vec<MonthEntry>) -> Result<Self> {
        let mut labels = HashSet::new();
        let mut normalised = Vec::with_capacity(months.len());

        for (index, month) in months.into_iter().enumerate() {
            validate_non_empty_string(&format!("months[{}].label", index), &month.label)?;
            if !labels.insert(month.label.clone()) {
                return Err(EffortError::InvalidConfigValueError {
                    field: format!("months[{}].label", index),
                    value: month.label,
                    reason: "Month label is already used".to_string(),
                });
            }

            let mut seen = HashSet::new();
            let mut month_total: u64 = 0;
            let mut operations = Vec::with_capacity(month.operations.len());
            for (row, op) in month.operations.into_iter().enumerate() {
                let field = format!("months[{}].operations[{}]", index, row);
                validate_country_code(&format!("{}.country", field), &op.country_code)?;
                validate_non_negative(&format!("{}.fuel_liters", field), op.fuel_liters)?;
                month_total = month_total.checked_add(op.sortie_count).ok_or_else(|| {
                    EffortError::InvalidConfigValueError {
                        field: format!("{}.sorties", field),
                        value: op.sortie_count.to_string(),
                        reason: "Month's total sortie count overflows".to_string(),
                    }
                })?;

                let code = op.country_code.to_ascii_uppercase();
                if !seen.insert(code.clone()) {
                    return Err(EffortError::DuplicateCountryError {
                        month: month.label,
                        country: code,
                    });
                }
                operations.push(OperationRecord {
                    country_code: code,
                    ..op
                });
            }

            normalised.push(MonthEntry {
                label: month.label,
                operations,
            });
        }

        Ok(Self { months: normalised })
    }

    pub fn months(&self) -> &[MonthEntry] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OperationRecord])> {
        self.months
            .iter()
            .map(|m| (m.label.as_str(), m.operations.as_slice()))
    }
}
