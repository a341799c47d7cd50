use crate::{allows_depreciation, default_subtype, parse_amount, AccountSubtype, AccountType, Currency};

pub type EntryId = u32;

/// Text typed by the user together with the value it parses to.
///
/// The text is kept verbatim so the user sees what they typed, the value is parsed once here so
/// nothing downstream ever deals with raw text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AmountInput {
    text: String,
    value: Currency,
}

impl AmountInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let value = parse_amount(&text);
        Self { text, value }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Currency {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for AmountInput {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub account: String,
    pub ty: AccountType,
    pub subtype: AccountSubtype,
    pub amount: AmountInput,
    pub depreciation: AmountInput,
}

impl LedgerEntry {
    /// Depreciation actually netted against the amount, never negative.
    pub fn depreciation_applied(&self) -> Currency {
        if allows_depreciation(self.ty, self.subtype) {
            self.depreciation.value().max(Currency::ZERO)
        } else {
            Currency::ZERO
        }
    }

    pub(crate) fn apply(&mut self, edit: FieldEdit) -> bool {
        match edit {
            FieldEdit::Account(account) => self.account = account,
            FieldEdit::Type(ty) => {
                self.ty = ty;
                self.subtype = default_subtype(ty);
                self.clear_inapplicable_depreciation();
            }
            FieldEdit::Subtype(subtype) => {
                if !crate::is_valid_subtype(self.ty, subtype) {
                    tracing::debug!(id = self.id, ty = %self.ty, %subtype, "ignoring invalid subtype");
                    return false;
                }
                self.subtype = subtype;
                self.clear_inapplicable_depreciation();
            }
            FieldEdit::Amount(amount) => self.amount = AmountInput::new(amount),
            FieldEdit::Depreciation(depreciation) => {
                if !allows_depreciation(self.ty, self.subtype) {
                    tracing::debug!(id = self.id, ty = %self.ty, subtype = %self.subtype, "ignoring depreciation");
                    return false;
                }
                self.depreciation = AmountInput::new(depreciation);
            }
        }
        true
    }

    fn clear_inapplicable_depreciation(&mut self) {
        if !allows_depreciation(self.ty, self.subtype) {
            self.depreciation = AmountInput::default();
        }
    }
}

/// One edit of a single ledger entry field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Account(String),
    /// Resets the subtype to the first valid one for the new type.
    Type(AccountType),
    Subtype(AccountSubtype),
    Amount(String),
    /// Only applies to non-current assets.
    Depreciation(String),
}

/// A ledger entry that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub account: String,
    pub ty: AccountType,
    pub subtype: AccountSubtype,
    pub amount: AmountInput,
    pub depreciation: AmountInput,
}

impl EntryDraft {
    pub fn new(
        account: impl Into<String>,
        ty: AccountType,
        subtype: AccountSubtype,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            ty,
            subtype,
            amount: AmountInput::new(amount),
            depreciation: AmountInput::default(),
        }
    }

    /// Ignored unless the draft is a non-current asset.
    pub fn with_depreciation(mut self, depreciation: impl Into<String>) -> Self {
        if allows_depreciation(self.ty, self.subtype) {
            self.depreciation = AmountInput::new(depreciation);
        }
        self
    }

    pub(crate) fn into_entry(self, id: EntryId) -> LedgerEntry {
        LedgerEntry {
            id,
            account: self.account,
            ty: self.ty,
            subtype: self.subtype,
            amount: self.amount,
            depreciation: self.depreciation,
        }
    }
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self::new("", AccountType::Expense, AccountSubtype::Operating, "")
    }
}
