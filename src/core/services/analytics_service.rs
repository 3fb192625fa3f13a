use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::core::services::{CategoryService, OperationService};
use crate::domain::common::{checked_add, checked_sum};
use crate::domain::{DateRange, EntityId, NamedEntity, OperationKind};
use crate::errors::{LedgerError, LedgerResult};

/// Read-only statistics over the operation ledger and category table.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsService<'a> {
    operations: &'a OperationService,
    categories: &'a CategoryService,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(operations: &'a OperationService, categories: &'a CategoryService) -> Self {
        Self {
            operations,
            categories,
        }
    }

    /// Income minus expense between two inclusive bounds.
    pub fn income_expense_difference(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> LedgerResult<Decimal> {
        let range = DateRange::between(start, end);
        let income = self.operations.income_total(range)?;
        checked_add(income, -self.operations.expense_total(range)?)
    }

    pub fn income_by_category(&self, range: DateRange) -> LedgerResult<BTreeMap<String, Decimal>> {
        self.by_category_name(OperationKind::Income, range)
    }

    pub fn expense_by_category(&self, range: DateRange) -> LedgerResult<BTreeMap<String, Decimal>> {
        self.by_category_name(OperationKind::Expense, range)
    }

    /// Mean amount of matching operations, zero when nothing matches.
    pub fn average_operation_amount(
        &self,
        kind: OperationKind,
        range: DateRange,
    ) -> LedgerResult<Decimal> {
        let matching = self.operations.matching(kind, range);
        if matching.is_empty() {
            return Ok(Decimal::ZERO);
        }
        let sum = checked_sum(matching.iter().map(|op| op.amount()))?;
        sum.checked_div(Decimal::from(matching.len()))
            .ok_or_else(|| LedgerError::validation("average is out of range"))
    }

    // Totals for deleted categories are dropped; equal names are summed together.
    fn by_category_name(
        &self,
        kind: OperationKind,
        range: DateRange,
    ) -> LedgerResult<BTreeMap<String, Decimal>> {
        let grouped: HashMap<EntityId, Decimal> =
            self.operations.grouped_by_category(kind, range)?;
        let mut named = BTreeMap::new();
        for (category_id, amount) in grouped {
            if let Some(category) = self.categories.get(category_id) {
                let total = named
                    .entry(category.name().to_string())
                    .or_insert(Decimal::ZERO);
                *total = checked_add(*total, amount)?;
            }
        }
        Ok(named)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::AccountService;
    use crate::domain::{AccountKind, CategoryKind, Identifiable, OperationDraft};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn empty_ledger_yields_zeroes() {
        let operations = OperationService::new();
        let categories = CategoryService::new();
        let analytics = AnalyticsService::new(&operations, &categories);

        assert_eq!(
            analytics.income_expense_difference(day(1), day(28)).unwrap(),
            Decimal::ZERO
        );
        assert!(analytics
            .income_by_category(DateRange::unbounded())
            .unwrap()
            .is_empty());
        assert_eq!(
            analytics
                .average_operation_amount(OperationKind::Expense, DateRange::unbounded())
                .unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn categories_with_equal_names_are_summed() {
        let mut accounts = AccountService::new();
        let mut categories = CategoryService::new();
        let mut operations = OperationService::new();
        let account = accounts.create("Main", dec!(0), AccountKind::Checking).unwrap().id();
        let first = categories.create(CategoryKind::Expense, "Food").unwrap().id();
        let second = categories.create(CategoryKind::Expense, "Food").unwrap().id();

        for (category, amount) in [(first, dec!(10)), (second, dec!(15))] {
            operations
                .create(
                    &mut accounts,
                    OperationDraft::new(OperationKind::Expense, account, amount, day(3), category),
                )
                .unwrap();
        }

        let analytics = AnalyticsService::new(&operations, &categories);
        let by_name = analytics.expense_by_category(DateRange::unbounded()).unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name["Food"], dec!(25));
    }

    #[test]
    fn average_divides_by_matching_count() {
        let mut accounts = AccountService::new();
        let categories = CategoryService::new();
        let mut operations = OperationService::new();
        let account = accounts.create("Main", dec!(0), AccountKind::Checking).unwrap().id();
        for (d, amount) in [(1, dec!(100)), (2, dec!(200)), (20, dec!(900))] {
            operations
                .create(
                    &mut accounts,
                    OperationDraft::new(OperationKind::Income, account, amount, day(d), 1),
                )
                .unwrap();
        }

        let analytics = AnalyticsService::new(&operations, &categories);
        let early = DateRange::between(day(1), day(2));
        assert_eq!(
            analytics.average_operation_amount(OperationKind::Income, early).unwrap(),
            dec!(150)
        );
        assert_eq!(
            analytics
                .average_operation_amount(OperationKind::Income, DateRange::unbounded())
                .unwrap(),
            dec!(400)
        );
    }

    #[test]
    fn aggregates_out_of_decimal_range_are_errors() {
        let mut accounts = AccountService::new();
        let mut categories = CategoryService::new();
        let mut operations = OperationService::new();
        let salary = categories.create(CategoryKind::Income, "Salary").unwrap().id();
        let huge = dec!(50000000000000000000000000000);
        for name in ["A", "B"] {
            let account = accounts.create(name, dec!(0), AccountKind::Checking).unwrap().id();
            operations
                .create(
                    &mut accounts,
                    OperationDraft::new(OperationKind::Income, account, huge, day(5), salary),
                )
                .unwrap();
        }

        let analytics = AnalyticsService::new(&operations, &categories);
        assert!(analytics.income_expense_difference(day(1), day(28)).is_err());
        assert!(analytics.income_by_category(DateRange::unbounded()).is_err());
        assert!(analytics
            .average_operation_amount(OperationKind::Income, DateRange::unbounded())
            .is_err());
        assert!(analytics
            .expense_by_category(DateRange::unbounded())
            .unwrap()
            .is_empty());
    }
}
