//! Account registration, login and profile management

use std::sync::Arc;

use board_auth::{AuthError, PasswordHasher, TokenCodec, TokenVerified};
use board_db::{AccountChanges, AccountStore, DbError, NewAccount, Store};
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::validate::{validate_email, validate_name, validate_password};
use crate::views::{AccountView, AuthenticatedAccount};

/// Salt used for the throwaway derivation when a login email is unknown
const DUMMY_KEY: &str = "timing-equalization-key-for-unknown-accounts-0000000000000000000";

/// New account details
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Profile changes; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Account resolver
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn Store>,
    hasher: Arc<PasswordHasher>,
    codec: Arc<TokenCodec>,
}

impl AccountService {
    pub fn new(store: Arc<dyn Store>, hasher: Arc<PasswordHasher>, codec: Arc<TokenCodec>) -> Self {
        Self {
            store,
            hasher,
            codec,
        }
    }

    /// Create an account. No token is issued; the caller logs in afterwards.
    pub async fn register(&self, registration: Registration) -> Result<AccountView, CoreError> {
        validate_email(&registration.email)?;
        validate_password(&registration.password)?;
        validate_name(&registration.name)?;

        if self
            .store
            .find_account_by_email(&registration.email)
            .await?
            .is_some()
        {
            warn!("Registration rejected, email taken: {}", registration.email);
            return Err(AuthError::AccountAlreadyExists.into());
        }

        let password_key = PasswordHasher::generate_key();
        let password_digest = self.hasher.derive(&registration.password, &password_key)?;

        let account = self
            .store
            .insert_account(NewAccount {
                email: registration.email,
                password_digest,
                password_key,
                name: registration.name,
            })
            .await
            .map_err(duplicate_as_exists)?;

        metrics::counter!("board_registrations_total").increment(1);
        info!("Registered account {} ({})", account.id, account.email);

        Ok(account.into())
    }

    /// Check credentials and issue a session token
    ///
    /// An unknown email and a wrong password are reported identically, and
    /// both paths run one derivation.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedAccount, CoreError> {
        validate_password(password)?;
        debug!("Login attempt for: {}", email);

        let account = match self.store.find_account_by_email(email).await? {
            Some(account) => account,
            None => {
                self.hasher.derive(password, DUMMY_KEY)?;
                metrics::counter!("board_logins_total", "outcome" => "failure").increment(1);
                warn!("Login failed for unknown email: {}", email);
                return Err(AuthError::WrongCredentials.into());
            }
        };

        if !self
            .hasher
            .verify(password, &account.password_key, &account.password_digest)?
        {
            metrics::counter!("board_logins_total", "outcome" => "failure").increment(1);
            warn!("Login failed for account: {}", account.id);
            return Err(AuthError::WrongCredentials.into());
        }

        let token = self.codec.issue(account.id)?;
        metrics::counter!("board_logins_total", "outcome" => "success").increment(1);
        info!("Account {} logged in", account.id);

        Ok(AuthenticatedAccount {
            user: account.into(),
            token,
            expires_in: self.codec.lifetime_secs(),
        })
    }

    /// The requester's own account
    pub async fn current(&self, verified: TokenVerified) -> Result<AccountView, CoreError> {
        let resolved = verified.resolve(self.store.as_ref()).await?;
        Ok(resolved.into_account().into())
    }

    /// Update the requester's profile and issue a new token
    ///
    /// A new password is derived with the account's existing key.
    pub async fn update(
        &self,
        verified: TokenVerified,
        update: AccountUpdate,
    ) -> Result<AuthenticatedAccount, CoreError> {
        let resolved = verified.resolve(self.store.as_ref()).await?;
        let account_id = resolved.account_id();
        let account = resolved.account();

        if let Some(email) = &update.email {
            validate_email(email)?;
            if *email != account.email
                && let Some(existing) = self.store.find_account_by_email(email).await?
                && existing.id != account.id
            {
                warn!("Email change rejected, email taken: {}", email);
                return Err(AuthError::AccountAlreadyExists.into());
            }
        }
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        let password_digest = match &update.password {
            Some(password) => {
                validate_password(password)?;
                Some(self.hasher.derive(password, &account.password_key)?)
            }
            None => None,
        };

        let changes = AccountChanges {
            email: update.email,
            name: update.name,
            password_digest,
        };

        let updated = if changes.is_empty() {
            resolved.into_account()
        } else {
            self.store
                .update_account(account_id, changes)
                .await
                .map_err(duplicate_as_exists)?
                .ok_or(AuthError::AccountNotFound)?
        };

        let token = self.codec.issue(updated.id)?;
        info!("Account {} updated profile", updated.id);

        Ok(AuthenticatedAccount {
            user: updated.into(),
            token,
            expires_in: self.codec.lifetime_secs(),
        })
    }
}

/// An email collision caught by the UNIQUE constraint is the same error as one caught by lookup
fn duplicate_as_exists(err: DbError) -> CoreError {
    match err {
        DbError::Duplicate(_) => AuthError::AccountAlreadyExists.into(),
        other => other.into(),
    }
}
