//! Summary computation.

use rust_decimal::Decimal;

use super::types::{ExpenseSummary, IncomeSummary, LedgerRow, Summary};

/// Computes the firm-wide summary from ledger rows and account totals.
pub struct SummaryService;

impl SummaryService {
    /// Rolls all ledgers and account totals into one summary.
    #[must_use]
    pub fn compute(
        ledgers: &[LedgerRow],
        income_totals: &[Decimal],
        expense_totals: &[Decimal],
    ) -> Summary {
        let total_fee: Decimal = ledgers.iter().map(|l| l.total_fee).sum();
        let received: Decimal = ledgers.iter().map(|l| l.received).sum();
        let other_income: Decimal = income_totals.iter().copied().sum();
        let expense_total: Decimal = expense_totals.iter().copied().sum();

        Summary {
            income: IncomeSummary {
                total_fee,
                received,
                pending: total_fee - received,
                other_income,
            },
            expenses: ExpenseSummary {
                total: expense_total,
            },
            net_position: received + other_income - expense_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn row(total_fee: Decimal, received: Decimal) -> LedgerRow {
        LedgerRow {
            project_id: Uuid::new_v4(),
            total_fee,
            received,
        }
    }

    #[test]
    fn test_empty_summary_is_all_zero() {
        let summary = SummaryService::compute(&[], &[], &[]);
        assert_eq!(summary.income.total_fee, dec!(0));
        assert_eq!(summary.income.received, dec!(0));
        assert_eq!(summary.income.pending, dec!(0));
        assert_eq!(summary.income.other_income, dec!(0));
        assert_eq!(summary.expenses.total, dec!(0));
        assert_eq!(summary.net_position, dec!(0));
    }

    #[test]
    fn test_two_projects_roll_up() {
        // Fees 100000/50000, received 40000/50000
        let ledgers = vec![
            row(dec!(100000), dec!(40000)),
            row(dec!(50000), dec!(50000)),
        ];
        let summary = SummaryService::compute(&ledgers, &[], &[]);
        assert_eq!(summary.income.total_fee, dec!(150000));
        assert_eq!(summary.income.received, dec!(90000));
        assert_eq!(summary.income.pending, dec!(60000));
    }

    #[test]
    fn test_other_income_rolls_up() {
        let summary = SummaryService::compute(&[], &[dec!(5000), dec!(3000)], &[]);
        assert_eq!(summary.income.other_income, dec!(8000));
        assert_eq!(summary.net_position, dec!(8000));
    }

    #[test]
    fn test_expenses_roll_up() {
        let summary = SummaryService::compute(&[], &[], &[dec!(1200.50), dec!(800)]);
        assert_eq!(summary.expenses.total, dec!(2000.50));
        assert_eq!(summary.net_position, dec!(-2000.50));
    }

    #[test]
    fn test_net_position() {
        let ledgers = vec![row(dec!(100000), dec!(40000))];
        let summary = SummaryService::compute(&ledgers, &[dec!(8000)], &[dec!(12000)]);
        assert_eq!(summary.net_position, dec!(36000));
    }

    #[test]
    fn test_overpaid_project_drags_pending_negative() {
        let ledgers = vec![row(dec!(10000), dec!(15000))];
        let summary = SummaryService::compute(&ledgers, &[], &[]);
        assert_eq!(summary.income.pending, dec!(-5000));
    }

    #[test]
    fn test_repeated_computation_identical() {
        let ledgers = vec![row(dec!(100000), dec!(40000))];
        let income = vec![dec!(8000)];
        let expenses = vec![dec!(3000)];
        let first = SummaryService::compute(&ledgers, &income, &expenses);
        let second = SummaryService::compute(&ledgers, &income, &expenses);
        assert_eq!(first, second);
    }
}
