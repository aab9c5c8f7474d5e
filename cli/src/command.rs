use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Subcommand};
use log::info;
use primitive_types::U256;
use serde_json::{json, Value};

use dappmint_common::{
    crypto::Address,
    sale::{self, DeployParams, ItemOrigin, RuntimeContext, SaleState, Stage},
    utils::{format_coin, from_coin},
};

/// Contract calls and queries
#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Deploy the contract into an empty state file
    Deploy {
        /// Prefix of every item URI
        base_uri: String,
        /// Global cap on issued items
        max_supply: u64,
        /// Stage one cap
        stage_one_max: u64,
        /// Stage two cap
        stage_two_max: u64,
        /// Reserved airdrop budget
        airdrop_max: u64,
        /// Administrator, defaults to the caller
        #[clap(long)]
        admin: Option<Address>,
        /// Deployer nonce used to derive the contract address
        #[clap(long, default_value_t = 0)]
        nonce: u64,
    },
    /// Buy items during a stage (attach payment with --value)
    Mint {
        /// Number of items
        count: u64,
        /// Stage number (1 or 2)
        stage: u8,
    },
    /// Set the paused flag of a stage
    Pause {
        /// true to halt minting, false to open the stage
        #[clap(action = ArgAction::Set)]
        paused: bool,
        /// Stage number (1 or 2)
        stage: u8,
    },
    /// Set the unit price of a stage, in coins
    SetCost {
        cost: String,
        /// Stage number (1 or 2)
        stage: u8,
    },
    /// Register the caller on the allow-list
    JoinWhiteList,
    /// Issue items to recipients from the airdrop budget
    AirDrop {
        /// Comma separated recipients
        #[clap(long, value_delimiter = ',', required = true)]
        to: Vec<Address>,
        /// Comma separated counts, one per recipient
        #[clap(long, value_delimiter = ',', required = true)]
        counts: Vec<u64>,
    },
    /// Pay net revenue out to recipients by weight
    Withdraw {
        /// Comma separated recipients
        #[clap(long, value_delimiter = ',', required = true)]
        to: Vec<Address>,
        /// Comma separated weights, one per recipient
        #[clap(long, value_delimiter = ',', required = true)]
        weights: Vec<u64>,
        /// Amount in coins
        amount: String,
    },
    /// Make value sent outside minting withdrawable
    WithdrawTrappedCash,
    /// Send plain value to the contract (attach it with --value)
    Receive,
    /// Replace the item URI prefix
    SetBaseUri { base_uri: String },
    /// Change the per-call mint limit
    SetMaxMintPerTime { max_mint_per_time: u64 },
    /// Hand the administrator role to another address
    TransferOwnership { new_owner: Address },
    /// Give up the administrator role
    RenounceOwnership,
    /// Move an item held by the caller
    Transfer { to: Address, token_id: u64 },
    /// Show the contract configuration and counters
    Info,
    /// List the items held by an address
    OwnerNfts { address: Address },
    /// List every issued item
    Minted,
    /// List the allow-list in registration order
    WhiteList,
    /// List airdrop recipients with their counts
    Airdroppers,
    /// Show what an address paid for stage mints
    TotalCost { address: Address },
    /// Show item count and withdrawn funds of an address
    Balance { address: Address },
    /// Show the URI of an item
    TokenUri { token_id: u64 },
}

impl Command {
    /// Whether a successful run changes the contract state
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Command::Info
                | Command::OwnerNfts { .. }
                | Command::Minted
                | Command::WhiteList
                | Command::Airdroppers
                | Command::TotalCost { .. }
                | Command::Balance { .. }
                | Command::TokenUri { .. }
        )
    }

    /// Whether value may be attached to the call
    pub fn is_payable(&self) -> bool {
        matches!(self, Command::Mint { .. } | Command::Receive)
    }
}

/// Caller, attached value and height of one invocation
#[derive(Clone, Debug)]
pub struct CallContext {
    pub caller: Option<Address>,
    pub value: U256,
    pub block_height: u64,
}

impl CallContext {
    fn runtime(&self) -> Result<RuntimeContext> {
        let caller = self
            .caller
            .ok_or_else(|| anyhow!("A caller is required: pass --from <address>"))?;
        Ok(RuntimeContext::new(caller, self.block_height).with_value(self.value))
    }
}

fn parse_stage(stage: u8) -> Result<Stage> {
    Ok(Stage::try_from(stage)?)
}

fn parse_amount(value: &str) -> Result<U256> {
    from_coin(value).with_context(|| format!("Invalid amount '{}'", value))
}

fn origin_label(origin: &ItemOrigin) -> String {
    match origin {
        ItemOrigin::Sale(stage) => format!("stage-{}", stage),
        ItemOrigin::Airdrop => "airdrop".to_string(),
    }
}

/// Run `command` against `state`
///
/// Returns the JSON document printed to the user. On error the state is
/// left as it was.
pub fn execute(state: &mut SaleState, call: &CallContext, command: &Command) -> Result<Value> {
    if !call.value.is_zero() && !command.is_payable() {
        bail!("This command does not accept value");
    }

    let output = match command {
        Command::Deploy {
            base_uri,
            max_supply,
            stage_one_max,
            stage_two_max,
            airdrop_max,
            admin,
            nonce,
        } => {
            let ctx = call.runtime()?;
            let params = DeployParams::new(
                base_uri.clone(),
                *max_supply,
                *stage_one_max,
                *stage_two_max,
                *airdrop_max,
                admin.unwrap_or(ctx.caller),
            )
            .with_nonce(*nonce);
            let address = sale::deploy(state, &ctx, params)?;
            info!("Contract deployed at {}", address);
            json!({ "address": address })
        }
        Command::Mint { count, stage } => {
            let stage = parse_stage(*stage)?;
            let token_ids = sale::mint_nft(state, &call.runtime()?, *count, stage)?;
            json!({ "stage": stage, "token_ids": token_ids })
        }
        Command::Pause { paused, stage } => {
            let stage = parse_stage(*stage)?;
            sale::pause(state, &call.runtime()?, *paused, stage)?;
            json!({ "stage": stage, "paused": paused })
        }
        Command::SetCost { cost, stage } => {
            let stage = parse_stage(*stage)?;
            let cost = parse_amount(cost)?;
            sale::set_cost(state, &call.runtime()?, cost, stage)?;
            json!({ "stage": stage, "cost": format_coin(cost) })
        }
        Command::JoinWhiteList => {
            let ctx = call.runtime()?;
            sale::join_white_list(state, &ctx)?;
            json!({ "account": ctx.caller })
        }
        Command::AirDrop { to, counts } => {
            let token_ids = sale::air_drop_to(state, &call.runtime()?, to, counts)?;
            json!({ "token_ids": token_ids })
        }
        Command::Withdraw { to, weights, amount } => {
            let amount = parse_amount(amount)?;
            let payouts = sale::withdraw_to(state, &call.runtime()?, to, weights, amount)?;
            let payouts: Vec<Value> = payouts
                .iter()
                .map(|payout| {
                    json!({
                        "recipient": payout.recipient,
                        "amount": format_coin(payout.amount),
                    })
                })
                .collect();
            json!({ "amount": format_coin(amount), "payouts": payouts })
        }
        Command::WithdrawTrappedCash => {
            let recovered = sale::withdraw_trapped_cash(state, &call.runtime()?)?;
            json!({ "recovered": format_coin(recovered) })
        }
        Command::Receive => {
            sale::receive(state, &call.runtime()?)?;
            json!({ "contract_balance": format_coin(sale::contract_balance(&*state)?) })
        }
        Command::SetBaseUri { base_uri } => {
            sale::set_base_uri(state, &call.runtime()?, base_uri.clone())?;
            json!({ "base_uri": base_uri })
        }
        Command::SetMaxMintPerTime { max_mint_per_time } => {
            sale::set_max_mint_per_time(state, &call.runtime()?, *max_mint_per_time)?;
            json!({ "max_mint_per_time": max_mint_per_time })
        }
        Command::TransferOwnership { new_owner } => {
            sale::transfer_ownership(state, &call.runtime()?, *new_owner)?;
            json!({ "owner": new_owner })
        }
        Command::RenounceOwnership => {
            sale::renounce_ownership(state, &call.runtime()?)?;
            json!({ "owner": Address::zero() })
        }
        Command::Transfer { to, token_id } => {
            let ctx = call.runtime()?;
            sale::transfer_from(state, &ctx, ctx.caller, *to, *token_id)?;
            json!({ "token_id": token_id, "from": ctx.caller, "to": to })
        }
        _ => query(state, command)?,
    };

    Ok(output)
}

/// Answer a read-only command
pub fn query(state: &SaleState, command: &Command) -> Result<Value> {
    let output = match command {
        Command::Info => {
            let info = sale::contract_info(state)?;
            json!({
                "address": info.address,
                "name": info.name,
                "symbol": info.symbol,
                "owner": info.owner,
                "base_uri": info.base_uri,
                "max_supply": info.max_supply,
                "total_supply": info.total_supply,
                "max_mint_per_time": info.max_mint_per_time,
                "stage_one": {
                    "max": info.stage_one_max,
                    "minted": info.stage_one_minted,
                    "cost": format_coin(info.stage_one_cost),
                    "paused": info.stage_one_paused,
                },
                "stage_two": {
                    "max": info.stage_two_max,
                    "minted": info.stage_two_minted,
                    "cost": format_coin(info.stage_two_cost),
                    "paused": info.stage_two_paused,
                },
                "airdrop_max": info.airdrop_max,
                "airdropped": info.airdropped,
                "net_revenue": format_coin(info.net_revenue),
                "contract_balance": format_coin(info.contract_balance),
            })
        }
        Command::OwnerNfts { address } => {
            let token_ids = sale::get_owner_nfts(state, address)?;
            let uris = token_ids
                .iter()
                .map(|id| sale::token_uri(state, *id))
                .collect::<Result<Vec<_>, _>>()?;
            json!({ "address": address, "token_ids": token_ids, "token_uris": uris })
        }
        Command::Minted => {
            let items: Vec<Value> = sale::get_minted_nfts(state)?
                .iter()
                .map(|item| {
                    json!({
                        "id": item.id,
                        "owner": item.owner,
                        "minter": item.minter,
                        "origin": origin_label(&item.origin),
                        "cost": format_coin(item.cost),
                        "minted_at": item.minted_at,
                    })
                })
                .collect();
            json!(items)
        }
        Command::WhiteList => json!(sale::get_white_list(state)?),
        Command::Airdroppers => {
            let recipients = sale::get_airdroppers(state)?;
            let entries = recipients
                .iter()
                .map(|account| -> Result<Value> {
                    Ok(json!({
                        "address": account,
                        "count": sale::airdropped_count(state, account)?,
                    }))
                })
                .collect::<Result<Vec<_>>>()?;
            json!(entries)
        }
        Command::TotalCost { address } => json!({
            "address": address,
            "minted": sale::minted_count(state, address)?,
            "total_cost": format_coin(sale::total_cost(state, address)?),
        }),
        Command::Balance { address } => json!({
            "address": address,
            "items": sale::balance_of(state, address)?,
            "balance": format_coin(sale::account_balance(state, address)?),
        }),
        Command::TokenUri { token_id } => json!({
            "token_id": token_id,
            "uri": sale::token_uri(state, *token_id)?,
        }),
        _ => bail!("Command changes the contract state"),
    };

    Ok(output)
}
