use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ledger::validation::{ValidationCode, ValidationErrors};
use crate::ledger::{Account, Ledger, Posting};

use super::{ServiceError, ServiceResult};

pub struct AccountService;

impl AccountService {
    pub fn add(ledger: &mut Ledger, account: Account) -> ServiceResult<Uuid> {
        if let Some(group_id) = account.group_id {
            Self::ensure_group_exists(ledger, group_id)?;
        }
        let mut errors = ValidationErrors::new();
        if account.name.trim().is_empty() {
            errors.add(Some("name"), ValidationCode::Blank);
        }
        Self::check_number(ledger, None, account.number, &mut errors);
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        Ok(ledger.add_account(account))
    }

    pub fn edit(ledger: &mut Ledger, id: Uuid, changes: Account) -> ServiceResult<()> {
        if let Some(group_id) = changes.group_id {
            Self::ensure_group_exists(ledger, group_id)?;
        }
        let mut errors = ValidationErrors::new();
        if changes.name.trim().is_empty() {
            errors.add(Some("name"), ValidationCode::Blank);
        }
        Self::check_number(ledger, Some(id), changes.number, &mut errors);
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        let account = ledger
            .account_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("account {id}")))?;
        account.number = changes.number;
        account.name = changes.name;
        account.kind = changes.kind;
        account.group_id = changes.group_id;
        account.accountable = changes.accountable;
        ledger.touch();
        Ok(())
    }

    /// Refuses to delete an account that has postings; the refusal is a
    /// plain result and leaves the ledger untouched.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<()> {
        if ledger.account(id).is_none() {
            return Err(ServiceError::NotFound(format!("account {id}")));
        }
        if ledger.postings().any(|posting| posting.account_id == id) {
            return Err(ServiceError::Constraint("Account has postings".into()));
        }
        ledger.accounts.retain(|account| account.id != id);
        ledger.touch();
        Ok(())
    }

    pub fn list<'a>(ledger: &'a Ledger) -> Vec<&'a Account> {
        ledger.accounts.iter().collect()
    }

    /// Postings of the account in document order.
    pub fn postings<'a>(ledger: &'a Ledger, id: Uuid) -> Vec<&'a Posting> {
        ledger
            .postings()
            .filter(|posting| posting.account_id == id)
            .collect()
    }

    /// Signed balance of the account: debit total minus credit total.
    pub fn balance(ledger: &Ledger, id: Uuid) -> ServiceResult<Decimal> {
        let account = ledger
            .account(id)
            .ok_or_else(|| ServiceError::NotFound(format!("account {id}")))?;
        Ok(account.balance(ledger))
    }

    fn check_number(
        ledger: &Ledger,
        exclude: Option<Uuid>,
        number: u32,
        errors: &mut ValidationErrors,
    ) {
        let taken = ledger.accounts.iter().any(|account| {
            account.number == number && exclude.map_or(true, |id| account.id != id)
        });
        if taken {
            errors.add(Some("number"), ValidationCode::NumberTaken);
        }
    }

    fn ensure_group_exists(ledger: &Ledger, group_id: Uuid) -> ServiceResult<()> {
        if ledger.group(group_id).is_some() {
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!("group {group_id}")))
        }
    }
}
