#![cfg_attr(not(feature = "std"), no_std, no_main)]

#[ink::contract]
mod tutor_token {
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    pub type Result<T> = core::result::Result<T, Error>;

    /// Token metadata constants.
    pub const TOKEN_NAME: &str = "TUTOR";
    pub const TOKEN_SYMBOL: &str = "TUT";
    pub const TOKEN_DECIMALS: u8 = 6;

    /// 100,000,000 whole tokens in smallest units, seeded to the deployer once.
    pub const INITIAL_SUPPLY: Balance = 100_000_000 * 1_000_000;

    /// Upper bound on mint-record metadata, in bytes.
    pub const MAX_METADATA_LEN: usize = 500;

    #[derive(Debug, PartialEq, Eq)]
    #[ink::scale_derive(Encode, Decode, TypeInfo)]
    pub enum Error {
        Unauthorized,
        Paused,
        InvalidAmount,
        InvalidRecipient,
        InvalidMinter,
        AlreadyRegistered,
        MetadataTooLong,
        InsufficientBalance,
        NotFound,
        Overflow,
    }

    /// Immutable audit entry appended on every successful mint.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[ink::scale_derive(Encode, Decode, TypeInfo)]
    #[cfg_attr(feature = "std", derive(ink::storage::traits::StorageLayout))]
    pub struct MintRecord {
        pub amount_val: Balance,
        pub to_acc: AccountId,
        pub metadata_text: String,
        pub timestamp_at: Timestamp,
    }

    #[ink(event)]
    pub struct Minted {
        #[ink(topic)]
        to_acc: AccountId,
        amount_val: Balance,
        metadata_text: String,
        record_id: u64,
    }

    #[ink(event)]
    pub struct Transferred {
        #[ink(topic)]
        from_acc: AccountId,
        #[ink(topic)]
        to_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct TransferredFrom {
        #[ink(topic)]
        owner_acc: AccountId,
        #[ink(topic)]
        spender_acc: AccountId,
        to_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct Approved {
        #[ink(topic)]
        owner_acc: AccountId,
        #[ink(topic)]
        spender_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct Burned {
        #[ink(topic)]
        from_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct PausedSet {
        paused_flag: bool,
    }

    #[ink(event)]
    pub struct MinterSet {
        #[ink(topic)]
        minter_acc: AccountId,
        enabled_flag: bool,
    }

    #[ink(event)]
    pub struct AdminChanged {
        #[ink(topic)]
        old_admin_acc: AccountId,
        #[ink(topic)]
        new_admin_acc: AccountId,
    }

    #[ink(storage)]
    pub struct TutorToken {
        // governance / control
        admin_acc: AccountId,
        /// Deployer identity; fixed at construction, barred as a mint target.
        deployer_acc: AccountId,
        paused_flag: bool,
        minters: Mapping<AccountId, bool>,

        // token state
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,

        // mint audit trail: ids start at 1, no gaps, never rewritten
        mint_records: Mapping<u64, MintRecord>,
        mint_count: u64,
    }

    impl TutorToken {
        // -------- constructor --------

        /// The deploying identity becomes admin and the sole initial minter,
        /// and is credited the full initial supply. One-time seeding: no
        /// mint record and no event are produced for it.
        #[ink(constructor)]
        pub fn new() -> Self {
            let deployer_acc = Self::env().caller();

            let mut balances = Mapping::default();
            balances.insert(&deployer_acc, &INITIAL_SUPPLY);

            let mut minters = Mapping::default();
            minters.insert(&deployer_acc, &true);

            Self {
                admin_acc: deployer_acc,
                deployer_acc,
                paused_flag: false,
                minters,
                total_supply: INITIAL_SUPPLY,
                balances,
                allowances: Mapping::default(),
                mint_records: Mapping::default(),
                mint_count: 0,
            }
        }

        // -------- modifiers (helpers) --------

        fn only_admin(&self) -> Result<()> {
            if self.env().caller() != self.admin_acc {
                return Err(Error::Unauthorized)
            }
            Ok(())
        }

        fn when_not_paused(&self) -> Result<()> {
            if self.paused_flag {
                return Err(Error::Paused)
            }
            Ok(())
        }

        // -------- read API --------

        #[ink(message)]
        pub fn name(&self) -> String {
            String::from(TOKEN_NAME)
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            String::from(TOKEN_SYMBOL)
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            TOKEN_DECIMALS
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, owner_acc: AccountId) -> Balance {
            self.balances.get(&owner_acc).unwrap_or(0)
        }

        #[ink(message)]
        pub fn allowance(&self, owner_acc: AccountId, spender_acc: AccountId) -> Balance {
            self.allowances.get(&(owner_acc, spender_acc)).unwrap_or(0)
        }

        #[ink(message)]
        pub fn mint_record(&self, record_id: u64) -> Result<MintRecord> {
            self.mint_records.get(&record_id).ok_or(Error::NotFound)
        }

        #[ink(message)]
        pub fn mint_record_count(&self) -> u64 {
            self.mint_count
        }

        #[ink(message)]
        pub fn is_minter(&self, minter_acc: AccountId) -> bool {
            self.minters.get(&minter_acc).unwrap_or(false)
        }

        #[ink(message)]
        pub fn is_paused(&self) -> bool {
            self.paused_flag
        }

        #[ink(message)]
        pub fn admin(&self) -> AccountId {
            self.admin_acc
        }

        // -------- admin / roles --------

        /// Hand the admin role to `new_admin_acc`. Admin-gated, never
        /// pause-gated.
        #[ink(message)]
        pub fn set_admin(&mut self, new_admin_acc: AccountId) -> Result<()> {
            self.only_admin()?;
            let old_admin_acc = self.admin_acc;
            self.admin_acc = new_admin_acc;
            self.env().emit_event(AdminChanged { old_admin_acc, new_admin_acc });
            Ok(())
        }

        /// Idempotent: pausing an already-paused ledger succeeds.
        #[ink(message)]
        pub fn pause(&mut self) -> Result<()> {
            self.only_admin()?;
            self.paused_flag = true;
            self.env().emit_event(PausedSet { paused_flag: true });
            Ok(())
        }

        #[ink(message)]
        pub fn unpause(&mut self) -> Result<()> {
            self.only_admin()?;
            self.paused_flag = false;
            self.env().emit_event(PausedSet { paused_flag: false });
            Ok(())
        }

        #[ink(message)]
        pub fn add_minter(&mut self, minter_acc: AccountId) -> Result<()> {
            self.only_admin()?;
            if self.minters.get(&minter_acc).unwrap_or(false) {
                return Err(Error::AlreadyRegistered)
            }
            self.minters.insert(&minter_acc, &true);
            self.env().emit_event(MinterSet { minter_acc, enabled_flag: true });
            Ok(())
        }

        /// Idempotent: removing an absent minter is not an error.
        #[ink(message)]
        pub fn remove_minter(&mut self, minter_acc: AccountId) -> Result<()> {
            self.only_admin()?;
            self.minters.insert(&minter_acc, &false);
            self.env().emit_event(MinterSet { minter_acc, enabled_flag: false });
            Ok(())
        }

        // -------- write API --------

        /// Privileged mint: caller must be a registered minter. Appends a
        /// mint record and returns its id. The deployer identity is barred
        /// as a recipient through this path.
        #[ink(message)]
        pub fn mint(
            &mut self,
            to_acc: AccountId,
            amount_val: Balance,
            metadata_text: String,
        ) -> Result<u64> {
            self.when_not_paused()?;
            let caller_acc = self.env().caller();
            if !self.minters.get(&caller_acc).unwrap_or(false) {
                return Err(Error::InvalidMinter)
            }
            if amount_val == 0 {
                return Err(Error::InvalidAmount)
            }
            if to_acc == self.deployer_acc {
                return Err(Error::InvalidRecipient)
            }
            if metadata_text.len() > MAX_METADATA_LEN {
                return Err(Error::MetadataTooLong)
            }

            let new_total = self.total_supply.checked_add(amount_val).ok_or(Error::Overflow)?;
            let to_bal = self.balances.get(&to_acc).unwrap_or(0);
            let new_to = to_bal.checked_add(amount_val).ok_or(Error::Overflow)?;
            let record_id = self.mint_count.checked_add(1).ok_or(Error::Overflow)?;

            self.total_supply = new_total;
            self.balances.insert(&to_acc, &new_to);
            self.mint_records.insert(
                &record_id,
                &MintRecord {
                    amount_val,
                    to_acc,
                    metadata_text: metadata_text.clone(),
                    timestamp_at: self.env().block_timestamp(),
                },
            );
            self.mint_count = record_id;

            self.env().emit_event(Minted { to_acc, amount_val, metadata_text, record_id });
            Ok(record_id)
        }

        #[ink(message)]
        pub fn transfer(&mut self, to_acc: AccountId, amount_val: Balance) -> Result<()> {
            self.when_not_paused()?;
            if amount_val == 0 {
                return Err(Error::InvalidAmount)
            }
            let from_acc = self.env().caller();
            self.move_balance(from_acc, to_acc, amount_val)?;
            self.env().emit_event(Transferred { from_acc, to_acc, amount_val });
            Ok(())
        }

        /// Absolute overwrite of the allowance, including down to zero. The
        /// approve/transfer-from race of the original design is preserved.
        #[ink(message)]
        pub fn approve(&mut self, spender_acc: AccountId, amount_val: Balance) -> Result<()> {
            self.when_not_paused()?;
            let owner_acc = self.env().caller();
            self.allowances.insert(&(owner_acc, spender_acc), &amount_val);
            self.env().emit_event(Approved { owner_acc, spender_acc, amount_val });
            Ok(())
        }

        /// Spend from `owner_acc`'s balance against the caller's allowance.
        /// Allowance is checked before balance; both must cover `amount_val`.
        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            owner_acc: AccountId,
            to_acc: AccountId,
            amount_val: Balance,
        ) -> Result<()> {
            self.when_not_paused()?;
            let spender_acc = self.env().caller();

            let current_allow = self.allowances.get(&(owner_acc, spender_acc)).unwrap_or(0);
            if current_allow < amount_val {
                return Err(Error::Unauthorized)
            }

            self.move_balance(owner_acc, to_acc, amount_val)?;

            let new_allow = current_allow.checked_sub(amount_val).ok_or(Error::Overflow)?;
            self.allowances.insert(&(owner_acc, spender_acc), &new_allow);

            self.env().emit_event(TransferredFrom { owner_acc, spender_acc, to_acc, amount_val });
            Ok(())
        }

        #[ink(message)]
        pub fn burn(&mut self, amount_val: Balance) -> Result<()> {
            self.when_not_paused()?;
            if amount_val == 0 {
                return Err(Error::InvalidAmount)
            }
            let from_acc = self.env().caller();
            let from_bal = self.balances.get(&from_acc).unwrap_or(0);
            if from_bal < amount_val {
                return Err(Error::InsufficientBalance)
            }
            let new_from = from_bal.checked_sub(amount_val).ok_or(Error::Overflow)?;
            let new_total = self.total_supply.checked_sub(amount_val).ok_or(Error::Overflow)?;
            self.balances.insert(&from_acc, &new_from);
            self.total_supply = new_total;
            self.env().emit_event(Burned { from_acc, amount_val });
            Ok(())
        }

        // ---- internals ----

        fn move_balance(
            &mut self,
            from_acc: AccountId,
            to_acc: AccountId,
            amount_val: Balance,
        ) -> Result<()> {
            let from_bal = self.balances.get(&from_acc).unwrap_or(0);
            if from_bal < amount_val {
                return Err(Error::InsufficientBalance)
            }
            let new_from = from_bal.checked_sub(amount_val).ok_or(Error::Overflow)?;
            self.balances.insert(&from_acc, &new_from);

            let to_bal = self.balances.get(&to_acc).unwrap_or(0);
            let new_to = to_bal.checked_add(amount_val).ok_or(Error::Overflow)?;
            self.balances.insert(&to_acc, &new_to);
            Ok(())
        }
    }

}
