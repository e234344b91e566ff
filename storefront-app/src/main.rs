use anyhow::Context;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use storefront_app::AppConfig;
use storefront_core::{Bean, Container};
use storefront_shared::{Grade, Member, MemberId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=debug,storefront_core=debug,storefront_order=info,storefront_member=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = AppConfig::load().context("Failed to load config")?;
    tracing::info!(policy = ?app.policy(), "Starting storefront");

    let member_service = app.member_service();
    let order_service = app.order_service();

    let member_id = MemberId(1);
    member_service.join(Member::new(member_id, "memberA", Grade::Vip));

    let order = order_service.create_order(member_id, "itemA", 10000)?;
    tracing::info!(%order, charged = order.calculate_price(), "Placed order");
    println!("{}", serde_json::to_string_pretty(&order)?);

    show_scopes()?;
    Ok(())
}

static NEXT_BEAN_ID: AtomicU64 = AtomicU64::new(1);

struct PrototypeBean {
    id: u64,
}

impl Bean for PrototypeBean {
    fn init(&self) {
        tracing::info!(id = self.id, "PrototypeBean.init");
    }

    fn destroy(&self) {
        tracing::info!(id = self.id, "PrototypeBean.destroy");
    }
}

struct SingletonBean {
    id: u64,
}

impl Bean for SingletonBean {
    fn init(&self) {
        tracing::info!(id = self.id, "SingletonBean.init");
    }

    fn destroy(&self) {
        tracing::info!(id = self.id, "SingletonBean.destroy");
    }
}

/// Retrieve each bean twice and report instance identity
fn show_scopes() -> anyhow::Result<()> {
    let mut container = Container::new();
    container
        .prototype(|| PrototypeBean { id: NEXT_BEAN_ID.fetch_add(1, Ordering::Relaxed) })
        .singleton(|| SingletonBean { id: NEXT_BEAN_ID.fetch_add(1, Ordering::Relaxed) });

    let prototype1 = container.get::<PrototypeBean>()?;
    let prototype2 = container.get::<PrototypeBean>()?;
    tracing::info!(
        first = prototype1.id,
        second = prototype2.id,
        same = Arc::ptr_eq(&prototype1, &prototype2),
        "Prototype scope"
    );

    let singleton1 = container.get::<SingletonBean>()?;
    let singleton2 = container.get::<SingletonBean>()?;
    tracing::info!(
        first = singleton1.id,
        second = singleton2.id,
        same = Arc::ptr_eq(&singleton1, &singleton2),
        "Singleton scope"
    );

    // only SingletonBean.destroy is logged
    container.close();
    Ok(())
}
