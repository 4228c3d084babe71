// tests/approval_flow.rs
//
// Fluxo de solicitação e aprovação de entradas, incluindo aprovações
// parciais, cota por partido e rejeição.

mod common;

use common::{admin_ctx, app_state, meta, register_ctx, seed_branch, seed_match};
use filiales_backend::models::{
    audit::ActionKind,
    auth::Role,
    tickets::{ApproveRequestPayload, CreateRequestPayload, RejectRequestPayload, RequestState},
};

#[tokio::test]
async fn partial_approval_keeps_request_open_and_consumes_capacity() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let partido = seed_match(&state, &admin, Some(100)).await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

    let request = state
        .ticket_service
        .create_request(
            &user,
            &meta(),
            CreateRequestPayload {
                branch_id: None,
                match_id: partido.id,
                quantity_requested: 20,
                observations: String::new(),
            },
        )
        .await
        .unwrap();
    assert_eq!(request.state, RequestState::Pending);

    let detail = state
        .ticket_service
        .approve(
            &admin,
            &meta(),
            request.id,
            ApproveRequestPayload {
                allocated_quantity: 5,
                comment: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(detail.request.state, RequestState::PartiallyApproved);
    assert_eq!(detail.allocations.len(), 1);
    assert_eq!(detail.allocations[0].quantity, 5);

    let partido = state.match_service.get_match(partido.id).await.unwrap();
    assert_eq!(partido.capacity_remaining, Some(95));
}

#[tokio::test]
async fn approval_up_to_requested_quantity_closes_the_request() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let partido = seed_match(&state, &admin, Some(100)).await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

    let request = state
        .ticket_service
        .create_request(
            &user,
            &meta(),
            CreateRequestPayload {
                branch_id: None,
                match_id: partido.id,
                quantity_requested: 10,
                observations: String::new(),
            },
        )
        .await
        .unwrap();

    // Complemento em duas parcelas: 4 + 6 fecham a solicitação.
    state
        .ticket_service
        .approve(
            &admin,
            &meta(),
            request.id,
            ApproveRequestPayload {
                allocated_quantity: 4,
                comment: None,
            },
        )
        .await
        .unwrap();
    let detail = state
        .ticket_service
        .approve(
            &admin,
            &meta(),
            request.id,
            ApproveRequestPayload {
                allocated_quantity: 6,
                comment: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(detail.request.state, RequestState::Approved);
    assert_eq!(detail.allocations.len(), 2);
}

#[tokio::test]
async fn allocation_beyond_requested_quantity_is_rejected() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let partido = seed_match(&state, &admin, Some(100)).await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

    let request = state
        .ticket_service
        .create_request(
            &user,
            &meta(),
            CreateRequestPayload {
                branch_id: None,
                match_id: partido.id,
                quantity_requested: 10,
                observations: String::new(),
            },
        )
        .await
        .unwrap();

    let err = state
        .ticket_service
        .approve(
            &admin,
            &meta(),
            request.id,
            ApproveRequestPayload {
                allocated_quantity: 11,
                comment: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("excede"));

    // Nada mudou: estado pendente, capacidade intocada, sem alocações.
    let detail = state
        .ticket_service
        .get_request(&admin, request.id)
        .await
        .unwrap();
    assert_eq!(detail.request.state, RequestState::Pending);
    assert!(detail.allocations.is_empty());
    let partido = state.match_service.get_match(partido.id).await.unwrap();
    assert_eq!(partido.capacity_remaining, Some(100));
}

#[tokio::test]
async fn match_quota_is_enforced_across_requests() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch_a = seed_branch(&state, &admin, "LP").await;
    let branch_b = seed_branch(&state, &admin, "BB").await;
    let partido = seed_match(&state, &admin, Some(10)).await;
    let user_a = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch_a.id)).await;
    let user_b = register_ctx(&state, "filial-bb", Role::BranchUser, Some(branch_b.id)).await;

    let first = state
        .ticket_service
        .create_request(
            &user_a,
            &meta(),
            CreateRequestPayload {
                branch_id: None,
                match_id: partido.id,
                quantity_requested: 8,
                observations: String::new(),
            },
        )
        .await
        .unwrap();
    let second = state
        .ticket_service
        .create_request(
            &user_b,
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

    state
        .ticket_service
        .approve(
            &admin,
            &meta(),
            first.id,
            ApproveRequestPayload {
                allocated_quantity: 8,
                comment: None,
            },
        )
        .await
        .unwrap();

    // Restam 2 no partido: aprovar 5 estoura a cota.
    let err = state
        .ticket_service
        .approve(
            &admin,
            &meta(),
            second.id,
            ApproveRequestPayload {
                allocated_quantity: 5,
                comment: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("cota"));

    // Aprovar dentro do que resta funciona.
    let detail = state
        .ticket_service
        .approve(
            &admin,
            &meta(),
            second.id,
            ApproveRequestPayload {
                allocated_quantity: 2,
                comment: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(detail.request.state, RequestState::PartiallyApproved);

    let partido = state.match_service.get_match(partido.id).await.unwrap();
    assert_eq!(partido.capacity_remaining, Some(0));
}

#[tokio::test]
async fn match_without_capacity_never_limits_approvals() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let partido = seed_match(&state, &admin, None).await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

    let request = state
        .ticket_service
        .create_request(
            &user,
            &meta(),
            CreateRequestPayload {
                branch_id: None,
                match_id: partido.id,
                quantity_requested: 5000,
                observations: String::new(),
            },
        )
        .await
        .unwrap();

    let detail = state
        .ticket_service
        .approve(
            &admin,
            &meta(),
            request.id,
            ApproveRequestPayload {
                allocated_quantity: 5000,
                comment: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(detail.request.state, RequestState::Approved);
    let partido = state.match_service.get_match(partido.id).await.unwrap();
    assert_eq!(partido.capacity_remaining, None);
}

#[tokio::test]
async fn rejection_closes_the_request_whatever_its_state() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let partido = seed_match(&state, &admin, Some(100)).await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

    let request = state
        .ticket_service
        .create_request(
            &user,
            &meta(),
            CreateRequestPayload {
                branch_id: None,
                match_id: partido.id,
                quantity_requested: 10,
                observations: String::new(),
            },
        )
        .await
        .unwrap();

    // Parcial e depois rejeição: o estado final é rejeitado.
    state
        .ticket_service
        .approve(
            &admin,
            &meta(),
            request.id,
            ApproveRequestPayload {
                allocated_quantity: 3,
                comment: None,
            },
        )
        .await
        .unwrap();
    let detail = state
        .ticket_service
        .reject(
            &admin,
            &meta(),
            request.id,
            RejectRequestPayload {
                motive: Some("Sem disponibilidade".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(detail.request.state, RequestState::Rejected);
    assert_eq!(detail.request.observations, "Sem disponibilidade");

    // Depois de rejeitada, nenhuma aprovação entra.
    let err = state
        .ticket_service
        .approve(
            &admin,
            &meta(),
            request.id,
            ApproveRequestPayload {
                allocated_quantity: 1,
                comment: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("resolvida"));
}

#[tokio::test]
async fn approval_writes_two_audit_records() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let partido = seed_match(&state, &admin, Some(100)).await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

    let request = state
        .ticket_service
        .create_request(
            &user,
            &meta(),
            CreateRequestPayload {
                branch_id: None,
                match_id: partido.id,
                quantity_requested: 10,
                observations: String::new(),
            },
        )
        .await
        .unwrap();
    state
        .ticket_service
        .approve(
            &admin,
            &meta(),
            request.id,
            ApproveRequestPayload {
                allocated_quantity: 10,
                comment: None,
            },
        )
        .await
        .unwrap();

    let trail = state
        .store
        .list_audit(admin.read_scope())
        .await
        .unwrap();
    let approvals: Vec<_> = trail
        .iter()
        .filter(|a| a.action == ActionKind::Approve)
        .collect();
    let assignments: Vec<_> = trail
        .iter()
        .filter(|a| a.action == ActionKind::AssignTickets)
        .collect();
    assert_eq!(approvals.len(), 1);
    assert_eq!(assignments.len(), 1);
    assert_eq!(approvals[0].resource, "TicketRequest");
    assert_eq!(assignments[0].resource, "TicketAllocation");
}
