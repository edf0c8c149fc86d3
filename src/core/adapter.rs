use crate::core::{Account, AccountRepository, UserDetails, UserDetailsService};
use crate::utils::error::{CatalogError, Result};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::RwLock;

/// 舊的帳號服務，API 維持原樣
#[derive(Debug, Default)]
pub struct AccountService {
    accounts: RwLock<HashMap<String, Account>>,
}

impl AccountService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for AccountService {
    /// 找不到的使用者回傳佔位帳號，所有欄位都等於 username
    fn find_account_by_username(&self, username: &str) -> Account {
        let stored = self
            .accounts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(username)
            .cloned();

        stored.unwrap_or_else(|| Account {
            name: username.to_string(),
            password: username.to_string(),
            email: username.to_string(),
        })
    }

    fn create_new_account(&self, account: Account) {
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        accounts.entry(account.name.clone()).or_insert(account);
    }

    fn update_account(&self, account: Account) {
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        accounts.insert(account.name.clone(), account);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    Name,
    Password,
    Email,
}

impl AccountField {
    fn read<'a>(&self, account: &'a Account) -> &'a str {
        match self {
            AccountField::Name => &account.name,
            AccountField::Password => &account.password,
            AccountField::Email => &account.email,
        }
    }
}

impl FromStr for AccountField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "name" => Ok(AccountField::Name),
            "password" => Ok(AccountField::Password),
            "email" => Ok(AccountField::Email),
            other => Err(CatalogError::UnknownVariant {
                kind: "account field".to_string(),
                selector: other.to_string(),
            }),
        }
    }
}

/// 每個 `UserDetails` 操作對應到哪個舊欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserDetailsMapping {
    username: AccountField,
    password: AccountField,
}

impl UserDetailsMapping {
    pub const OPERATIONS: [&'static str; 2] = ["username", "password"];

    /// 兩個操作都必須有對應，否則不建立 adapter
    pub fn from_table(table: &HashMap<String, String>) -> Result<Self> {
        let known: HashSet<&str> = Self::OPERATIONS.into_iter().collect();
        if let Some(extra) = table.keys().find(|key| !known.contains(key.as_str())) {
            return Err(CatalogError::InvalidConfigValueError {
                field: "accounts.mapping".to_string(),
                value: extra.clone(),
                reason: format!("Target operations are: {}", Self::OPERATIONS.join(", ")),
            });
        }

        let lookup = |operation: &str| -> Result<AccountField> {
            table
                .get(operation)
                .ok_or_else(|| CatalogError::MissingMapping {
                    operation: operation.to_string(),
                })?
                .parse()
        };

        Ok(Self {
            username: lookup("username")?,
            password: lookup("password")?,
        })
    }

    fn translate(&self, account: &Account) -> AccountUserDetails {
        AccountUserDetails {
            username: self.username.read(account).to_string(),
            password: self.password.read(account).to_string(),
        }
    }
}

impl Default for UserDetailsMapping {
    fn default() -> Self {
        Self {
            username: AccountField::Name,
            password: AccountField::Password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountUserDetails {
    username: String,
    password: String,
}

impl UserDetails for AccountUserDetails {
    fn username(&self) -> &str {
        &self.username
    }

    fn password(&self) -> &str {
        &self.password
    }
}

/// 物件轉接器：透過舊的 repository 實作目標介面
pub struct AccountUserDetailsService<R: AccountRepository> {
    accounts: R,
    mapping: UserDetailsMapping,
}

impl<R: AccountRepository> AccountUserDetailsService<R> {
    pub fn new(accounts: R) -> Self {
        Self::with_mapping(accounts, UserDetailsMapping::default())
    }

    pub fn with_mapping(accounts: R, mapping: UserDetailsMapping) -> Self {
        Self { accounts, mapping }
    }

    pub fn accounts(&self) -> &R {
        &self.accounts
    }
}

impl<R: AccountRepository> UserDetailsService for AccountUserDetailsService<R> {
    fn load_user(&self, username: &str) -> Result<Box<dyn UserDetails>> {
        let account = self.accounts.find_account_by_username(username);
        Ok(Box::new(self.mapping.translate(&account)))
    }
}

// 類別轉接器：直接讓舊的 AccountService 實作目標介面
impl UserDetailsService for AccountService {
    fn load_user(&self, username: &str) -> Result<Box<dyn UserDetails>> {
        let account = self.find_account_by_username(username);
        Ok(Box::new(UserDetailsMapping::default().translate(&account)))
    }
}

pub struct LoginHandler<S: UserDetailsService> {
    service: S,
}

impl<S: UserDetailsService> LoginHandler<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// 成功時回傳 username
    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        let details = self.service.load_user(username)?;
        if details.password() == password {
            tracing::debug!("Login succeeded for {}", details.username());
            Ok(details.username().to_string())
        } else {
            tracing::warn!("Login failed for {}", username);
            Err(CatalogError::AuthenticationFailed {
                username: username.to_string(),
            })
        }
    }
}
