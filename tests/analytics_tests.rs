mod common;

use common::{at, category, finance_with_account, record};
use finledger::domain::{CategoryKind, DateRange, OperationKind};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn difference_matches_income_minus_expense() {
    let (mut finance, account) = finance_with_account(dec!(0));
    let salary = category(&mut finance, CategoryKind::Income, "Salary");
    let rent = category(&mut finance, CategoryKind::Expense, "Rent");
    record(&mut finance, OperationKind::Income, account, dec!(3000), at(2024, 1, 1), salary);
    record(&mut finance, OperationKind::Expense, account, dec!(1200.50), at(2024, 1, 3), rent);
    record(&mut finance, OperationKind::Income, account, dec!(3000), at(2024, 2, 1), salary);

    let analytics = finance.analytics();
    let january = DateRange::between(at(2024, 1, 1), at(2024, 1, 31));
    assert_eq!(
        analytics
            .income_expense_difference(at(2024, 1, 1), at(2024, 1, 31))
            .unwrap(),
        finance.operations.income_total(january).unwrap()
            - finance.operations.expense_total(january).unwrap()
    );
    assert_eq!(
        analytics
            .income_expense_difference(at(2024, 1, 1), at(2024, 1, 31))
            .unwrap(),
        dec!(1799.50)
    );
    assert_eq!(
        analytics
            .income_expense_difference(at(2025, 1, 1), at(2025, 12, 31))
            .unwrap(),
        Decimal::ZERO
    );
}

#[test]
fn breakdown_sums_per_category_name() {
    let (mut finance, account) = finance_with_account(dec!(10000));
    let food = category(&mut finance, CategoryKind::Expense, "Food");
    let salary = category(&mut finance, CategoryKind::Income, "Salary");
    for amount in [dec!(100), dec!(200), dec!(300)] {
        record(&mut finance, OperationKind::Expense, account, amount, at(2024, 3, 5), food);
    }
    record(&mut finance, OperationKind::Income, account, dec!(6000), at(2024, 3, 1), salary);

    let analytics = finance.analytics();
    let expenses = analytics.expense_by_category(DateRange::unbounded()).unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses["Food"], dec!(600));

    let income = analytics.income_by_category(DateRange::unbounded()).unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income["Salary"], dec!(6000));
}

#[test]
fn deleted_category_leaves_breakdown_but_not_totals() {
    let (mut finance, account) = finance_with_account(dec!(0));
    let food = category(&mut finance, CategoryKind::Expense, "Food");
    let fuel = category(&mut finance, CategoryKind::Expense, "Fuel");
    record(&mut finance, OperationKind::Expense, account, dec!(80), at(2024, 4, 2), food);
    record(&mut finance, OperationKind::Expense, account, dec!(45), at(2024, 4, 9), fuel);

    assert!(finance.categories.delete(fuel));

    let analytics = finance.analytics();
    let breakdown = analytics.expense_by_category(DateRange::unbounded()).unwrap();
    assert_eq!(breakdown.keys().collect::<Vec<_>>(), vec!["Food"]);
    assert_eq!(
        finance.operations.expense_total(DateRange::unbounded()).unwrap(),
        dec!(125)
    );
    assert_eq!(
        analytics
            .income_expense_difference(at(2024, 4, 1), at(2024, 4, 30))
            .unwrap(),
        dec!(-125)
    );
}

#[test]
fn average_respects_kind_and_window() {
    let (mut finance, account) = finance_with_account(dec!(0));
    record(&mut finance, OperationKind::Expense, account, dec!(10), at(2024, 5, 1), 1);
    record(&mut finance, OperationKind::Expense, account, dec!(20), at(2024, 5, 2), 1);
    record(&mut finance, OperationKind::Expense, account, dec!(60), at(2024, 6, 1), 1);
    record(&mut finance, OperationKind::Income, account, dec!(1000), at(2024, 5, 1), 2);

    let analytics = finance.analytics();
    let may = DateRange::between(at(2024, 5, 1), at(2024, 5, 31));
    assert_eq!(
        analytics
            .average_operation_amount(OperationKind::Expense, may)
            .unwrap(),
        dec!(15)
    );
    assert_eq!(
        analytics
            .average_operation_amount(OperationKind::Expense, DateRange::unbounded())
            .unwrap(),
        dec!(30)
    );

    let before = DateRange::new(None, Some(at(2024, 4, 30)));
    assert_eq!(
        analytics
            .average_operation_amount(OperationKind::Income, before)
            .unwrap(),
        Decimal::ZERO
    );
}
