//! Deterministic devnet accounts
//!
//! The same named principals every run: `deployer` (the configured reviewer)
//! and `wallet_1` through `wallet_8`.

use grade_review_core::{LedgerConfig, PrincipalId};

const DEVNET: [(&str, &str); 9] = [
    ("deployer", "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"),
    ("wallet_1", "ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5"),
    ("wallet_2", "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG"),
    ("wallet_3", "ST2JHG361ZXG51QTKY2NQCVBPPRRE2KZB1HR05NNC"),
    ("wallet_4", "ST2NEB84ASENDXKYGJPQW86YXQCEFEX2ZQPG87ND"),
    ("wallet_5", "ST2REHHS5J3CERCRBEPMGH7921Q6PYKAADT7JP2VB"),
    ("wallet_6", "ST3AM1A56AK2C1XAFJ4115ZSV26EB49BVQ10MGCS0"),
    ("wallet_7", "ST3PF13W7Z0RRM42A8VZRVFQ75SV1K26RXEP8YGKJ"),
    ("wallet_8", "ST3NBRSFKX28FQ2ZJ1MAKX58HKHSDGNV5N7R21XCP"),
];

/// Named test principal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Fixture name, e.g. `wallet_1`
    pub name: &'static str,
    /// Principal address
    pub address: PrincipalId,
}

/// The devnet account set
#[derive(Debug, Clone)]
pub struct Accounts {
    accounts: Vec<Account>,
}

impl Accounts {
    /// Deployer plus eight wallets
    pub fn devnet() -> Self {
        let accounts = DEVNET
            .iter()
            .map(|&(name, address)| Account {
                name,
                address: PrincipalId::new(address).expect("devnet address is valid"),
            })
            .collect();
        Self { accounts }
    }

    /// Look up an account by fixture name
    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.name == name)
    }

    /// The deployer, which is also the configured reviewer
    pub fn deployer(&self) -> &Account {
        &self.accounts[0]
    }

    /// `wallet_<n>` for `n` in 1..=8
    pub fn wallet(&self, n: usize) -> &Account {
        assert!((1..self.accounts.len()).contains(&n), "no wallet_{n}");
        &self.accounts[n]
    }

    /// All wallets, excluding the deployer
    pub fn wallets(&self) -> &[Account] {
        &self.accounts[1..]
    }

    /// Ledger config with the deployer as reviewer and default bounds
    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig::new(self.deployer().address.clone())
    }
}
