use crate::domain::field::Field;
use crate::domain::operation::Operation;
use clap::{Parser, Subcommand};

/// One line typed at the console.
#[derive(Parser, Debug, PartialEq)]
#[command(no_binary_name = true, name = "hsa-client", disable_version_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Overwrite an input field (no value clears it)
    Set {
        field: Field,
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Create a user and funding account
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Deposit funds into an account
    Deposit {
        #[arg(long)]
        account: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,
    },
    /// Issue a payment card for an account
    Card {
        #[arg(long)]
        account: Option<String>,
    },
    /// Submit a purchase for authorization
    Purchase {
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        card: Option<String>,
        #[arg(long)]
        merchant: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,
    },
    /// Fetch an account summary
    Summary {
        #[arg(long)]
        account: Option<String>,
    },
    /// List the merchants available for purchases
    Merchants,
    /// Show every input field and control
    Show,
    /// Leave the console
    #[command(alias = "exit")]
    Quit,
}

impl Command {
    /// The operation this command triggers, with the field values given inline.
    pub fn operation(self) -> Option<(Operation, Vec<(Field, String)>)> {
        let (operation, inline) = match self {
            Command::Create { name, email } => (
                Operation::CreateUser,
                vec![(Field::Name, name), (Field::Email, email)],
            ),
            Command::Deposit { account, amount } => (
                Operation::Deposit,
                vec![
                    (Field::DepositAccount, account),
                    (Field::DepositAmount, amount),
                ],
            ),
            Command::Card { account } => {
                (Operation::IssueCard, vec![(Field::CardAccount, account)])
            }
            Command::Purchase {
                account,
                card,
                merchant,
                amount,
            } => (
                Operation::Purchase,
                vec![
                    (Field::PurchaseAccount, account),
                    (Field::PurchaseCard, card),
                    (Field::Merchant, merchant),
                    (Field::PurchaseAmount, amount),
                ],
            ),
            Command::Summary { account } => {
                (Operation::Summary, vec![(Field::SummaryAccount, account)])
            }
            Command::Set { .. } | Command::Merchants | Command::Show | Command::Quit => {
                return None;
            }
        };
        let values = inline
            .into_iter()
            .filter_map(|(field, value)| value.map(|value| (field, value)))
            .collect();
        Some((operation, values))
    }
}

/// Splits a console line into words. Single or double quotes group words;
/// there are no escapes.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}
