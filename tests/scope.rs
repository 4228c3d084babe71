// tests/scope.rs
//
// Alcance de leitura por papel: administradores e coordenadores enxergam a
// rede toda, usuários de filial só a própria filial, usuário de filial sem
// filial não enxerga nada.

mod common;

use common::{admin_ctx, app_state, meta, register_ctx, seed_branch, seed_match};
use filiales_backend::models::{auth::Role, tickets::CreateRequestPayload};

#[tokio::test]
async fn branch_user_only_sees_its_own_requests() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch_a = seed_branch(&state, &admin, "LP").await;
    let branch_b = seed_branch(&state, &admin, "BB").await;
    let partido = seed_match(&state, &admin, None).await;
    let user_a = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch_a.id)).await;
    let user_b = register_ctx(&state, "filial-bb", Role::BranchUser, Some(branch_b.id)).await;

    for (user, qty) in [(&user_a, 5), (&user_b, 7)] {
        state
            .ticket_service
            .create_request(
                user,
                &meta(),
                CreateRequestPayload {
                    branch_id: None,
                    match_id: partido.id,
                    quantity_requested: qty,
                    observations: String::new(),
                },
            )
            .await
            .unwrap();
    }

    let visible = state.ticket_service.list_requests(&user_a).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].branch_id, branch_a.id);

    let all = state.ticket_service.list_requests(&admin).await.unwrap();
    assert_eq!(all.len(), 2);

    let coordinator = register_ctx(&state, "coordenador", Role::Coordinator, None).await;
    let all = state
        .ticket_service
        .list_requests(&coordinator)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn request_of_another_branch_reads_as_not_found() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch_a = seed_branch(&state, &admin, "LP").await;
    let branch_b = seed_branch(&state, &admin, "BB").await;
    let partido = seed_match(&state, &admin, None).await;
    let user_a = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch_a.id)).await;
    let user_b = register_ctx(&state, "filial-bb", Role::BranchUser, Some(branch_b.id)).await;

    let request = state
        .ticket_service
        .create_request(
            &user_a,
            &meta(),
            CreateRequestPayload {
                branch_id: None,
                match_id: partido.id,
                quantity_requested: 5,
                observations: String::new(),
            },
        )
        .await
        .unwrap();

    // A existência do registro alheio não é revelada.
    let err = state
        .ticket_service
        .get_request(&user_b, request.id)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("não encontrad"));
}

#[tokio::test]
async fn branch_list_is_scoped_like_everything_else() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch_a = seed_branch(&state, &admin, "LP").await;
    let _branch_b = seed_branch(&state, &admin, "BB").await;
    let user_a = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch_a.id)).await;

    let visible = state.branch_service.list_branches(&user_a).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, branch_a.id);

    let all = state.branch_service.list_branches(&admin).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn audit_trail_respects_the_callers_scope() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch_a = seed_branch(&state, &admin, "LP").await;
    let branch_b = seed_branch(&state, &admin, "BB").await;
    let user_a = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch_a.id)).await;

    let own = state
        .store
        .list_audit(user_a.read_scope())
        .await
        .unwrap();
    assert!(own.iter().all(|a| a.branch_id == Some(branch_a.id)));
    assert!(!own.is_empty());

    let all = state.store.list_audit(admin.read_scope()).await.unwrap();
    assert!(all.iter().any(|a| a.branch_id == Some(branch_b.id)));
}
