//! LiteSVM Integration Tests for Comet Solana
//!
//! Drives the deployed program through real transactions: account
//! constraints, market-signed vault transfers, lazily created positions and
//! price feeds passed as remaining accounts.
//!
//! The program binary comes from `anchor build`
//! (`target/deploy/comet_solana.so`), so these tests are ignored by default:
//! `cargo test -- --ignored` runs them.

use anchor_lang::solana_program::{clock::Clock, pubkey::Pubkey, system_instruction};
use anchor_lang::{system_program, AccountDeserialize, InstructionData, ToAccountMetas};
use litesvm::types::TransactionResult;
use litesvm::LiteSVM;

use comet_solana::accounts as comet_accounts;
use comet_solana::constants::{FACTOR_SCALE, PRICE_SCALE};
use comet_solana::errors::CometError;
use comet_solana::instruction as comet_ix;
use comet_solana::interfaces::InterestRateModel;
use comet_solana::state::{
    derive_liquidator_points, derive_market, derive_position, derive_vault, AssetParams,
    LiquidatorPoints, Market, MarketConfig, Position,
};

use solana_sdk::instruction::{AccountMeta, Instruction, InstructionError};
use solana_sdk::program_pack::Pack;
use solana_sdk::signature::{Keypair, Signer as SolanaSigner};
use solana_sdk::transaction::{Transaction, TransactionError};
use spl_associated_token_account::get_associated_token_address;
use spl_token::state::{Account as TokenAccount, Mint};

// ============================================================================
// Test Constants
// ============================================================================

const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
const INITIAL_BALANCE: u64 = 100 * LAMPORTS_PER_SOL;

const BASE_DECIMALS: u8 = 6; // e.g., USDC
const COLLATERAL_DECIMALS: u8 = 9; // e.g., SOL

const USDC: u64 = 1_000_000;
const COLLATERAL: u64 = 1_000_000_000;
const PERCENT: u64 = (FACTOR_SCALE / 100) as u64;

const BASE_PRICE: u64 = PRICE_SCALE as u64; // $1
const COLLATERAL_PRICE: u64 = 100 * PRICE_SCALE as u64; // $100

// ============================================================================
// Test Environment
// ============================================================================

pub struct TestEnv {
    pub svm: LiteSVM,

    pub admin: Keypair,
    pub alice: Keypair,   // Supplier
    pub bob: Keypair,     // Borrower
    pub charlie: Keypair, // Absorber

    pub base_mint: Keypair,
    pub collateral_mint: Keypair,
    pub base_feed: Keypair,
    pub collateral_feed: Keypair,

    pub market: Pubkey,
}

impl TestEnv {
    /// Load the program and fund the test wallets
    pub fn new() -> Self {
        let mut svm = LiteSVM::new();

        let admin = Keypair::new();
        let alice = Keypair::new();
        let bob = Keypair::new();
        let charlie = Keypair::new();

        for wallet in [&admin, &alice, &bob, &charlie] {
            svm.airdrop(&wallet.pubkey(), INITIAL_BALANCE).unwrap();
        }

        svm.add_program_from_file(
            comet_solana::ID,
            concat!(env!("CARGO_MANIFEST_DIR"), "/../../target/deploy/comet_solana.so"),
        )
        .unwrap();

        let base_mint = Keypair::new();
        let market = derive_market(&comet_solana::ID, &base_mint.pubkey()).0;

        TestEnv {
            svm,
            admin,
            alice,
            bob,
            charlie,
            base_mint,
            collateral_mint: Keypair::new(),
            base_feed: Keypair::new(),
            collateral_feed: Keypair::new(),
            market,
        }
    }

    /// Market with one collateral asset listed and funded wallets:
    /// alice holds 10,000 USDC, bob holds 1,000 USDC and 10 collateral
    pub fn with_market() -> Self {
        let mut env = Self::new();
        let admin = env.admin.insecure_clone();

        env.create_mint(&env.base_mint.insecure_clone(), BASE_DECIMALS);
        env.create_mint(&env.collateral_mint.insecure_clone(), COLLATERAL_DECIMALS);
        env.init_price_feed(&env.base_feed.insecure_clone(), BASE_PRICE);
        env.init_price_feed(&env.collateral_feed.insecure_clone(), COLLATERAL_PRICE);

        let base = env.base_mint.pubkey();
        let collateral = env.collateral_mint.pubkey();

        let init_ix = Instruction {
            program_id: comet_solana::ID,
            accounts: comet_accounts::InitializeMarket {
                admin: admin.pubkey(),
                market: env.market,
                base_mint: base,
                base_price_feed: env.base_feed.pubkey(),
                base_vault: env.vault(&base),
                token_program: spl_token::id(),
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: comet_ix::InitializeMarket {
                config: MarketConfig {
                    base_borrow_min: 10 * USDC,
                    rate_model: InterestRateModel {
                        base_rate: FACTOR_SCALE * 2 / 100,
                        slope_low: FACTOR_SCALE / 10,
                        slope_high: FACTOR_SCALE,
                        kink: FACTOR_SCALE * 8 / 10,
                        reserve_factor: FACTOR_SCALE / 10,
                    },
                },
            }
            .data(),
        };
        env.send(&[init_ix], &admin, &[&admin]).unwrap();

        let add_asset_ix = Instruction {
            program_id: comet_solana::ID,
            accounts: comet_accounts::AddAsset {
                admin: admin.pubkey(),
                market: env.market,
                asset_mint: collateral,
                price_feed: env.collateral_feed.pubkey(),
                asset_vault: env.vault(&collateral),
                token_program: spl_token::id(),
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: comet_ix::AddAsset {
                params: AssetParams {
                    borrow_collateral_factor: 80 * PERCENT,
                    liquidate_collateral_factor: 85 * PERCENT,
                    liquidation_factor: 90 * PERCENT,
                    supply_cap: u128::MAX,
                },
            }
            .data(),
        };
        env.send(&[add_asset_ix], &admin, &[&admin]).unwrap();

        let alice = env.alice.pubkey();
        let bob = env.bob.pubkey();
        let alice_base = env.create_ata(&alice, &base);
        let bob_base = env.create_ata(&bob, &base);
        let bob_collateral = env.create_ata(&bob, &collateral);

        env.mint_to(&base, &alice_base, 10_000 * USDC);
        env.mint_to(&base, &bob_base, 1_000 * USDC);
        env.mint_to(&collateral, &bob_collateral, 10 * COLLATERAL);

        env
    }

    /// Sign and send, expiring the blockhash so repeated instructions stay unique
    pub fn send(
        &mut self,
        instructions: &[Instruction],
        payer: &Keypair,
        signers: &[&Keypair],
    ) -> TransactionResult {
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            signers,
            self.svm.latest_blockhash(),
        );
        let result = self.svm.send_transaction(tx);
        self.svm.expire_blockhash();
        result
    }

    /// Warp time forward by the given number of seconds
    pub fn warp_time(&mut self, seconds: i64) {
        let mut clock: Clock = self.svm.get_sysvar();
        clock.unix_timestamp += seconds;
        self.svm.set_sysvar(&clock);
    }

    pub fn get_time(&self) -> i64 {
        let clock: Clock = self.svm.get_sysvar();
        clock.unix_timestamp
    }

    pub fn vault(&self, mint: &Pubkey) -> Pubkey {
        derive_vault(&comet_solana::ID, &self.market, mint).0
    }

    pub fn position_pda(&self, owner: &Pubkey) -> Pubkey {
        derive_position(&comet_solana::ID, &self.market, owner).0
    }

    /// Feed accounts for every listed asset, in remaining-account form
    pub fn feeds(&self) -> Vec<Pubkey> {
        vec![self.base_feed.pubkey(), self.collateral_feed.pubkey()]
    }

    // ------------------------------------------------------------------------
    // Token helpers
    // ------------------------------------------------------------------------

    pub fn create_mint(&mut self, mint: &Keypair, decimals: u8) {
        let admin = self.admin.insecure_clone();
        let rent = self.svm.minimum_balance_for_rent_exemption(Mint::LEN);

        let create_ix = system_instruction::create_account(
            &admin.pubkey(),
            &mint.pubkey(),
            rent,
            Mint::LEN as u64,
            &spl_token::id(),
        );

        let init_ix = spl_token::instruction::initialize_mint(
            &spl_token::id(),
            &mint.pubkey(),
            &admin.pubkey(),
            None,
            decimals,
        )
        .unwrap();

        self.send(&[create_ix, init_ix], &admin, &[&admin, mint]).unwrap();
    }

    pub fn create_ata(&mut self, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        let admin = self.admin.insecure_clone();
        let ix = spl_associated_token_account::instruction::create_associated_token_account(
            &admin.pubkey(),
            owner,
            mint,
            &spl_token::id(),
        );
        self.send(&[ix], &admin, &[&admin]).unwrap();
        get_associated_token_address(owner, mint)
    }

    pub fn mint_to(&mut self, mint: &Pubkey, dest: &Pubkey, amount: u64) {
        let admin = self.admin.insecure_clone();
        let ix = spl_token::instruction::mint_to(
            &spl_token::id(),
            mint,
            dest,
            &admin.pubkey(),
            &[],
            amount,
        )
        .unwrap();
        self.send(&[ix], &admin, &[&admin]).unwrap();
    }

    pub fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> u64 {
        let account = self
            .svm
            .get_account(&get_associated_token_address(owner, mint))
            .unwrap();
        TokenAccount::unpack(&account.data).unwrap().amount
    }

    // ------------------------------------------------------------------------
    // Program instructions
    // ------------------------------------------------------------------------

    pub fn init_price_feed(&mut self, feed: &Keypair, price: u64) {
        let admin = self.admin.insecure_clone();
        let ix = Instruction {
            program_id: comet_solana::ID,
            accounts: comet_accounts::InitPriceFeed {
                admin: admin.pubkey(),
                price_feed: feed.pubkey(),
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: comet_ix::InitPriceFeed { price }.data(),
        };
        self.send(&[ix], &admin, &[&admin, feed]).unwrap();
    }

    pub fn set_price(&mut self, feed: &Pubkey, price: u64) -> TransactionResult {
        let admin = self.admin.insecure_clone();
        let ix = Instruction {
            program_id: comet_solana::ID,
            accounts: comet_accounts::SetPrice {
                admin: admin.pubkey(),
                price_feed: *feed,
            }
            .to_account_metas(None),
            data: comet_ix::SetPrice { price }.data(),
        };
        self.send(&[ix], &admin, &[&admin])
    }

    pub fn supply(&mut self, user: &Keypair, mint: &Pubkey, amount: u64) -> TransactionResult {
        let ix = Instruction {
            program_id: comet_solana::ID,
            accounts: comet_accounts::Supply {
                owner: user.pubkey(),
                market: self.market,
                position: self.position_pda(&user.pubkey()),
                asset_mint: *mint,
                owner_token_account: get_associated_token_address(&user.pubkey(), mint),
                vault: self.vault(mint),
                token_program: spl_token::id(),
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: comet_ix::Supply { amount }.data(),
        };
        self.send(&[ix], user, &[user])
    }

    pub fn withdraw(
        &mut self,
        user: &Keypair,
        mint: &Pubkey,
        amount: u64,
        feeds: &[Pubkey],
    ) -> TransactionResult {
        let mut accounts = comet_accounts::Withdraw {
            owner: user.pubkey(),
            market: self.market,
            position: self.position_pda(&user.pubkey()),
            asset_mint: *mint,
            receiver_token_account: get_associated_token_address(&user.pubkey(), mint),
            vault: self.vault(mint),
            token_program: spl_token::id(),
        }
        .to_account_metas(None);
        accounts.extend(feeds.iter().map(|feed| AccountMeta::new_readonly(*feed, false)));

        let ix = Instruction {
            program_id: comet_solana::ID,
            accounts,
            data: comet_ix::Withdraw { amount }.data(),
        };
        self.send(&[ix], user, &[user])
    }

    pub fn absorb(&mut self, absorber: &Keypair, borrower: &Pubkey) -> TransactionResult {
        let mut accounts = comet_accounts::Absorb {
            absorber: absorber.pubkey(),
            market: self.market,
            position: self.position_pda(borrower),
            liquidator_points: self.points_pda(&absorber.pubkey()),
            system_program: system_program::ID,
        }
        .to_account_metas(None);
        accounts.extend(
            self.feeds()
                .into_iter()
                .map(|feed| AccountMeta::new_readonly(feed, false)),
        );

        let ix = Instruction {
            program_id: comet_solana::ID,
            accounts,
            data: comet_ix::Absorb {}.data(),
        };
        self.send(&[ix], absorber, &[absorber])
    }

    pub fn points_pda(&self, absorber: &Pubkey) -> Pubkey {
        derive_liquidator_points(&comet_solana::ID, &self.market, absorber).0
    }

    // ------------------------------------------------------------------------
    // Account readers
    // ------------------------------------------------------------------------

    pub fn read<T: AccountDeserialize>(&self, address: &Pubkey) -> T {
        let account = self.svm.get_account(address).unwrap();
        T::try_deserialize(&mut account.data.as_slice()).unwrap()
    }

    pub fn position(&self, owner: &Pubkey) -> Position {
        self.read(&self.position_pda(owner))
    }

    pub fn market_state(&self) -> Market {
        self.read(&self.market)
    }
}

fn assert_custom_error(result: TransactionResult, expected: CometError) {
    let failed = result.expect_err("transaction should fail");
    assert_eq!(
        failed.err,
        TransactionError::InstructionError(0, InstructionError::Custom(u32::from(expected))),
        "logs: {:?}",
        failed.meta.logs
    );
}

// ============================================================================
// Lending Flow
// ============================================================================

mod lending_tests {
    use super::*;

    #[test]
    #[ignore = "needs target/deploy/comet_solana.so from anchor build"]
    fn test_supply_borrow_repay() {
        let mut env = TestEnv::with_market();
        let (alice, bob) = (env.alice.insecure_clone(), env.bob.insecure_clone());
        let base = env.base_mint.pubkey();
        let collateral = env.collateral_mint.pubkey();

        // Supplying creates the position on first use
        env.supply(&alice, &base, 10_000 * USDC).unwrap();
        assert_eq!(env.token_balance(&alice.pubkey(), &base), 0);
        assert_eq!(env.position(&alice.pubkey()).base_principal, 10_000 * USDC as i128);

        env.supply(&bob, &collateral, 10 * COLLATERAL).unwrap();
        assert_eq!(env.position(&bob.pubkey()).collateral[0], 10 * COLLATERAL as u128);

        // $1000 collateral * 0.8 = $800 of borrowing power
        let feeds = env.feeds();
        env.withdraw(&bob, &base, 700 * USDC, &feeds).unwrap();
        assert_eq!(env.token_balance(&bob.pubkey(), &base), 1_700 * USDC);
        assert_eq!(env.position(&bob.pubkey()).base_principal, -(700 * USDC as i128));
        assert_eq!(env.market_state().total_borrow_base, 700 * USDC as u128);

        // A month of interest: repaying the principal alone leaves debt
        env.warp_time(30 * 86_400);
        env.supply(&bob, &base, 700 * USDC).unwrap();
        assert!(env.position(&bob.pubkey()).base_principal < 0);
        assert_eq!(env.market_state().last_accrual_time, env.get_time());

        env.supply(&bob, &base, 10 * USDC).unwrap();
        assert!(env.position(&bob.pubkey()).base_principal >= 0);
        assert_eq!(env.market_state().total_borrow_base, 0);

        // Debt-free, all collateral comes back
        env.withdraw(&bob, &collateral, 10 * COLLATERAL, &feeds).unwrap();
        assert_eq!(env.token_balance(&bob.pubkey(), &collateral), 10 * COLLATERAL);
    }

    #[test]
    #[ignore = "needs target/deploy/comet_solana.so from anchor build"]
    fn test_withdraw_undercollateralized() {
        let mut env = TestEnv::with_market();
        let (alice, bob) = (env.alice.insecure_clone(), env.bob.insecure_clone());
        let base = env.base_mint.pubkey();
        let collateral = env.collateral_mint.pubkey();
        let feeds = env.feeds();

        env.supply(&alice, &base, 10_000 * USDC).unwrap();
        env.supply(&bob, &collateral, 10 * COLLATERAL).unwrap();

        assert_custom_error(
            env.withdraw(&bob, &base, 801 * USDC, &feeds),
            CometError::Undercollateralized,
        );
        assert_eq!(env.token_balance(&bob.pubkey(), &base), 1_000 * USDC);
        assert_eq!(env.position(&bob.pubkey()).base_principal, 0);

        // Exactly at the borrow limit, then any collateral withdrawal fails
        env.withdraw(&bob, &base, 800 * USDC, &feeds).unwrap();
        assert_custom_error(
            env.withdraw(&bob, &collateral, 1, &feeds),
            CometError::Undercollateralized,
        );
        assert_eq!(env.position(&bob.pubkey()).collateral[0], 10 * COLLATERAL as u128);
    }

    #[test]
    #[ignore = "needs target/deploy/comet_solana.so from anchor build"]
    fn test_below_minimum_borrow() {
        let mut env = TestEnv::with_market();
        let (alice, bob) = (env.alice.insecure_clone(), env.bob.insecure_clone());
        let base = env.base_mint.pubkey();
        let collateral = env.collateral_mint.pubkey();
        let feeds = env.feeds();

        env.supply(&alice, &base, 10_000 * USDC).unwrap();
        env.supply(&bob, &collateral, 10 * COLLATERAL).unwrap();

        assert_custom_error(
            env.withdraw(&bob, &base, 9 * USDC, &feeds),
            CometError::BelowMinimumBorrow,
        );
    }
}

// ============================================================================
// Price Feed Accounts
// ============================================================================

mod price_feed_tests {
    use super::*;

    #[test]
    #[ignore = "needs target/deploy/comet_solana.so from anchor build"]
    fn test_borrow_without_feeds_fails() {
        let mut env = TestEnv::with_market();
        let (alice, bob) = (env.alice.insecure_clone(), env.bob.insecure_clone());
        let base = env.base_mint.pubkey();
        let collateral = env.collateral_mint.pubkey();

        env.supply(&alice, &base, 10_000 * USDC).unwrap();
        env.supply(&bob, &collateral, 10 * COLLATERAL).unwrap();

        assert_custom_error(
            env.withdraw(&bob, &base, 100 * USDC, &[]),
            CometError::PriceFeedMissing,
        );
    }

    #[test]
    #[ignore = "needs target/deploy/comet_solana.so from anchor build"]
    fn test_feed_not_owned_by_program_rejected() {
        let mut env = TestEnv::with_market();
        let (alice, bob) = (env.alice.insecure_clone(), env.bob.insecure_clone());
        let base = env.base_mint.pubkey();
        let collateral = env.collateral_mint.pubkey();

        env.supply(&alice, &base, 10_000 * USDC).unwrap();
        env.supply(&bob, &collateral, 10 * COLLATERAL).unwrap();

        // A system-owned wallet posing as the collateral feed
        let feeds = vec![env.base_feed.pubkey(), alice.pubkey()];
        assert_custom_error(
            env.withdraw(&bob, &base, 100 * USDC, &feeds),
            CometError::InvalidPrice,
        );
    }

    #[test]
    #[ignore = "needs target/deploy/comet_solana.so from anchor build"]
    fn test_set_price_requires_feed_admin() {
        let mut env = TestEnv::with_market();
        let mallory = env.alice.insecure_clone();
        let ix = Instruction {
            program_id: comet_solana::ID,
            accounts: comet_accounts::SetPrice {
                admin: mallory.pubkey(),
                price_feed: env.collateral_feed.pubkey(),
            }
            .to_account_metas(None),
            data: comet_ix::SetPrice { price: 1 }.data(),
        };

        assert_custom_error(
            env.send(&[ix], &mallory, &[&mallory]),
            CometError::Unauthorized,
        );
    }
}

// ============================================================================
// Absorb
// ============================================================================

mod absorb_tests {
    use super::*;

    #[test]
    #[ignore = "needs target/deploy/comet_solana.so from anchor build"]
    fn test_absorb_after_price_drop() {
        let mut env = TestEnv::with_market();
        let (alice, bob, charlie) = (
            env.alice.insecure_clone(),
            env.bob.insecure_clone(),
            env.charlie.insecure_clone(),
        );
        let base = env.base_mint.pubkey();
        let collateral = env.collateral_mint.pubkey();
        let feeds = env.feeds();

        env.supply(&alice, &base, 10_000 * USDC).unwrap();
        env.supply(&bob, &collateral, 10 * COLLATERAL).unwrap();
        env.withdraw(&bob, &base, 800 * USDC, &feeds).unwrap();

        // $1000 * 0.85 = $850 still covers $800
        assert_custom_error(env.absorb(&charlie, &bob.pubkey()), CometError::NotLiquidatable);

        // $900 * 0.85 = $765 no longer does
        let collateral_feed = env.collateral_feed.pubkey();
        env.set_price(&collateral_feed, 90 * PRICE_SCALE as u64).unwrap();
        env.absorb(&charlie, &bob.pubkey()).unwrap();

        // Seized $900 * 0.9 = $810 against $800 of debt leaves a small supply
        let position = env.position(&bob.pubkey());
        assert_eq!(position.collateral[0], 0);
        assert!(position.base_principal > 0);

        let market = env.market_state();
        assert_eq!(market.totals_collateral[0], 0);
        assert_eq!(market.total_borrow_base, 0);

        // Points account was created for the absorber
        let points: LiquidatorPoints = env.read(&env.points_pda(&charlie.pubkey()));
        assert_eq!(points.liquidator, charlie.pubkey());
        assert_eq!(points.num_absorbs, 1);
        assert!(points.value_absorbed > 0);

        // No tokens moved: the seized collateral stays in the vault
        let vault = env.svm.get_account(&env.vault(&collateral)).unwrap();
        assert_eq!(TokenAccount::unpack(&vault.data).unwrap().amount, 10 * COLLATERAL);
    }
}
