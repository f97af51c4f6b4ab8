//! Host-style wiring: a registry whose handlers drive real explosion and
//! reroll passes against the context bundle the host would supply.

use async_trait::async_trait;

use kw_dice::{Category, DicePool, Die, DieTerm, PoolTerm};
use kw_dispatch::{DispatchOutcome, PhaseHandler, PhaseRegistry, SilentNotifier};
use kw_resolve::{
    DecisionPrompt, ExplodeChoice, ForcePolicy, OptionStack, RerollChoice, RngRoller, RoundGuard,
    run_explosion, run_reroll,
};

/// Picks the first offered entry at the largest allowed count; rerolls the
/// first entry's minimum unconditionally.
struct AutoPrompt {
    reroll_value: u32,
}

#[async_trait]
impl DecisionPrompt for AutoPrompt {
    async fn choose_explosion(&mut self, stack: &OptionStack, budget: u32) -> ExplodeChoice {
        match stack.entries().first() {
            None => ExplodeChoice::Cancel,
            Some(entry) => ExplodeChoice::Pick {
                category: entry.category.clone(),
                die: entry.die,
                count: entry.available.min(budget),
            },
        }
    }

    async fn choose_reroll(&mut self, stack: &OptionStack) -> RerollChoice {
        match stack.entries().first() {
            None => RerollChoice::Cancel,
            Some(entry) => RerollChoice::Pick {
                category: entry.category.clone(),
                die: entry.die,
                value: self.reroll_value,
            },
        }
    }
}

/// The context bundle a host would hand to the dispatcher.
struct ActionCtx {
    pool: DicePool,
    explode_budget: u32,
    prompt: AutoPrompt,
    roller: RngRoller,
    guard: RoundGuard,
}

struct ExplodeOnDamage;

#[async_trait]
impl PhaseHandler<ActionCtx> for ExplodeOnDamage {
    async fn handle(&self, ctx: &mut ActionCtx) -> anyhow::Result<()> {
        run_explosion(
            &mut ctx.pool,
            ctx.explode_budget,
            &mut ctx.prompt,
            &mut ctx.roller,
            ForcePolicy::default().with_auto_select_single(),
        )
        .await?;
        Ok(())
    }
}

struct RerollOnDamage;

#[async_trait]
impl PhaseHandler<ActionCtx> for RerollOnDamage {
    async fn handle(&self, ctx: &mut ActionCtx) -> anyhow::Result<()> {
        run_reroll(
            &mut ctx.pool,
            &mut ctx.prompt,
            &mut ctx.roller,
            &mut ctx.guard,
        )
        .await?;
        Ok(())
    }
}

fn ctx(results: Vec<u32>, reroll_value: u32) -> ActionCtx {
    let pool = DicePool::from_terms(
        vec![PoolTerm::Dice(DieTerm::new(
            Die::D6,
            Some(Category::named("fire")),
            results,
        ))],
        Category::named("fire"),
    )
    .unwrap();
    let mut guard = RoundGuard::new();
    guard.enter_round("round-1");
    ActionCtx {
        pool,
        explode_budget: 2,
        prompt: AutoPrompt { reroll_value },
        roller: RngRoller::from_seed(7),
        guard,
    }
}

fn registry() -> PhaseRegistry<ActionCtx> {
    PhaseRegistry::new("Savage Attacker")
        .register("DamageRollComplete", ExplodeOnDamage)
        .register("RerollWindow", RerollOnDamage)
}

#[tokio::test]
async fn explosion_phase_splices_and_keeps_total_consistent() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mut ctx = ctx(vec![6, 6, 3], 3);
    let before = ctx.pool.total();

    let outcome = registry()
        .dispatch("DamageRollComplete", &mut ctx, &SilentNotifier)
        .await;

    assert_eq!(outcome, DispatchOutcome::Handled);
    assert!(ctx.pool.total() >= before + 2);
    assert_eq!(ctx.pool.recomputed_total(), ctx.pool.total());
    assert!(ctx.pool.formula().starts_with("3d6 + "));
}

#[tokio::test]
async fn reroll_phase_consumes_the_round_guard() {
    let mut ctx = ctx(vec![2, 5, 2], 2);

    let outcome = registry()
        .dispatch("RerollWindow", &mut ctx, &SilentNotifier)
        .await;

    assert_eq!(outcome, DispatchOutcome::Handled);
    assert!(ctx.guard.consumed());
    assert_eq!(ctx.pool.recomputed_total(), ctx.pool.total());

    // A second dispatch in the same round leaves the pool alone.
    let snapshot = ctx.pool.clone();
    registry()
        .dispatch("RerollWindow", &mut ctx, &SilentNotifier)
        .await;
    assert_eq!(ctx.pool, snapshot);
}

#[tokio::test]
async fn stale_reroll_selection_faults_without_poisoning_the_host() {
    // Prompt claims a die showing 4, which the pool does not contain.
    let mut ctx = ctx(vec![2, 5, 2], 4);
    let snapshot = ctx.pool.clone();

    let outcome = registry()
        .dispatch("RerollWindow", &mut ctx, &SilentNotifier)
        .await;

    match outcome {
        DispatchOutcome::Faulted { message } => assert!(message.contains("showing 4")),
        other => panic!("expected fault, got {other:?}"),
    }
    assert_eq!(ctx.pool, snapshot);
    assert!(!ctx.guard.consumed());
}

#[tokio::test]
async fn irrelevant_phases_pass_through() {
    let mut ctx = ctx(vec![6], 1);
    let outcome = registry()
        .dispatch("TemplatePlaced", &mut ctx, &SilentNotifier)
        .await;
    assert_eq!(outcome, DispatchOutcome::Unregistered);
}
