use {
    crate::{
        calldata::{ParseError, RouterQuote},
        router::{RouterError, Swap, SwapRouter},
    },
    alloy::{
        primitives::{Address, Bytes, U256},
        sol_types::SolCall,
    },
    model::interaction::InteractionData,
    thiserror::Error,
};

alloy::sol! {
    function approve(address spender, uint256 amount) external returns (bool);
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Router(#[from] RouterError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// ERC-20 approval of `amount` of `token` for `spender`.
pub fn approve(token: Address, spender: Address, amount: U256) -> InteractionData {
    InteractionData {
        target: token,
        call_data: approveCall { spender, amount }.abi_encode().into(),
        value: U256::ZERO,
    }
}

/// Turns `(target, call data, value)` triples into interactions, keeping
/// their order since that is the order they get executed in.
pub fn assemble(
    interactions: impl IntoIterator<Item = (Address, Bytes, U256)>,
) -> Vec<InteractionData> {
    interactions
        .into_iter()
        .map(|(target, call_data, value)| InteractionData {
            target,
            call_data,
            value,
        })
        .collect()
}

/// Quotes the swap with the router and returns the interactions executing
/// it: the approval of the sell token for the router followed by the swap.
pub async fn build(
    router: &dyn SwapRouter,
    router_address: Address,
    swap: &Swap,
) -> Result<Vec<InteractionData>, Error> {
    let report = router.quote(swap).await?;
    let quote = RouterQuote::parse(&report)?;
    tracing::debug!(
        call_data_len = quote.call_data.len(),
        value = %quote.value,
        "parsed router quote"
    );

    let approval = approve(swap.sell_token, router_address, swap.sell_amount);
    Ok(assemble([
        (approval.target, approval.call_data, approval.value),
        (router_address, quote.call_data, quote.value),
    ]))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::router::MockSwapRouter,
        alloy::primitives::address,
    };

    const ROUTER: Address = address!("Cf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9");

    fn swap() -> Swap {
        Swap {
            sell_token: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            buy_token: address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
            sell_amount: U256::from(10).pow(U256::from(18)),
            recipient: address!("610178dA211FEF7D417bC0e6FeD39F05609AD788"),
        }
    }

    #[test]
    fn approve_call_data() {
        let interaction = approve(Address::repeat_byte(1), Address::repeat_byte(2), U256::from(3));
        assert_eq!(interaction.target, Address::repeat_byte(1));
        assert_eq!(interaction.value, U256::ZERO);
        let call_data = &interaction.call_data;
        assert_eq!(call_data.len(), 4 + 32 + 32);
        // approve(address,uint256)
        assert_eq!(call_data[..4], [0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(call_data[4..16], [0; 12]);
        assert_eq!(call_data[16..36], [2; 20]);
        assert_eq!(call_data[67], 3);
    }

    #[test]
    fn assemble_keeps_order_and_duplicates() {
        let first = (Address::repeat_byte(1), Bytes::from(vec![1]), U256::ZERO);
        let second = (Address::repeat_byte(2), Bytes::from(vec![2]), U256::from(5));
        let interactions = assemble([first.clone(), second.clone(), first.clone()]);
        assert_eq!(interactions.len(), 3);
        assert_eq!(interactions[0].target, first.0);
        assert_eq!(interactions[1].call_data, second.1);
        assert_eq!(interactions[1].value, second.2);
        assert_eq!(interactions[2], interactions[0]);
        assert!(assemble(Vec::<(Address, Bytes, U256)>::new()).is_empty());
    }

    #[tokio::test]
    async fn approval_comes_before_swap() {
        observe::tracing::initialize_reentrant("swap_interactions=debug");
        let mut router = MockSwapRouter::new();
        router
            .expect_quote()
            .withf(|quoted| *quoted == swap())
            .times(1)
            .returning(|_| Ok("Calldata: 0xabc123\n          Value: 42\n".to_owned()));

        let interactions = build(&router, ROUTER, &swap()).await.unwrap();
        assert_eq!(interactions.len(), 2);
        assert_eq!(
            interactions[0],
            approve(swap().sell_token, ROUTER, swap().sell_amount)
        );
        assert_eq!(
            interactions[1],
            InteractionData {
                target: ROUTER,
                call_data: Bytes::from(vec![0xab, 0xc1, 0x23]),
                value: U256::from(42),
            }
        );
    }

    #[tokio::test]
    async fn unparsable_quote_is_an_error() {
        let mut router = MockSwapRouter::new();
        router
            .expect_quote()
            .returning(|_| Ok("no route found\n".to_owned()));
        assert!(matches!(
            build(&router, ROUTER, &swap()).await,
            Err(Error::Parse(ParseError::MissingMarker(_)))
        ));
    }

    #[tokio::test]
    async fn router_errors_are_propagated() {
        let mut router = MockSwapRouter::new();
        router
            .expect_quote()
            .returning(|_| Err(RouterError::Timeout(std::time::Duration::from_secs(1))));
        assert!(matches!(
            build(&router, ROUTER, &swap()).await,
            Err(Error::Router(RouterError::Timeout(_)))
        ));
    }
}
