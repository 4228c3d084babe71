// tests/messages_flow.rs
//
// Conversas de filial e globais, envio de mensagens e marcação de leitura.

mod common;

use common::{admin_ctx, app_state, meta, register_ctx, seed_branch};
use filiales_backend::models::{
    auth::Role,
    messages::{CreateConversationPayload, CreateMessagePayload, Visibility},
};

#[tokio::test]
async fn branch_conversation_is_invisible_to_other_branches() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch_a = seed_branch(&state, &admin, "LP").await;
    let branch_b = seed_branch(&state, &admin, "BB").await;
    let user_a = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch_a.id)).await;
    let user_b = register_ctx(&state, "filial-bb", Role::BranchUser, Some(branch_b.id)).await;

    let conversation = state
        .message_service
        .create_conversation(
            &user_a,
            &meta(),
            CreateConversationPayload {
                subject: "Viagem a La Plata".to_string(),
                visibility: Visibility::Branch,
            },
        )
        .await
        .unwrap();

    let visible = state
        .message_service
        .list_conversations(&user_b)
        .await
        .unwrap();
    assert!(visible.is_empty());

    let err = state
        .message_service
        .list_messages(&user_b, conversation.id)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("não encontrad"));

    // O administrador enxerga e participa normalmente.
    let visible = state
        .message_service
        .list_conversations(&admin)
        .await
        .unwrap();
    assert_eq!(visible.len(), 1);
}

#[tokio::test]
async fn global_conversation_reaches_users_without_a_branch() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    seed_branch(&state, &admin, "LP").await;

    let conversation = state
        .message_service
        .create_conversation(
            &admin,
            &meta(),
            CreateConversationPayload {
                subject: "Comunicado geral".to_string(),
                visibility: Visibility::Global,
            },
        )
        .await
        .unwrap();
    assert_eq!(conversation.branch_id, None);

    let coordinator = register_ctx(&state, "coordenador", Role::Coordinator, None).await;
    let visible = state
        .message_service
        .list_conversations(&coordinator)
        .await
        .unwrap();
    assert_eq!(visible.len(), 1);
}

#[tokio::test]
async fn only_administrators_open_global_conversations() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

    let err = state
        .message_service
        .create_conversation(
            &user,
            &meta(),
            CreateConversationPayload {
                subject: "Tentativa".to_string(),
                visibility: Visibility::Global,
            },
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("administradores"));
}

#[tokio::test]
async fn marking_a_message_read_is_idempotent() {
    let state = app_state();
    let admin = admin_ctx(&state).await;
    let branch = seed_branch(&state, &admin, "LP").await;
    let user = register_ctx(&state, "filial-lp", Role::BranchUser, Some(branch.id)).await;

    let conversation = state
        .message_service
        .create_conversation(
            &user,
            &meta(),
            CreateConversationPayload {
                subject: "Entradas".to_string(),
                visibility: Visibility::Branch,
            },
        )
        .await
        .unwrap();
    let message = state
        .message_service
        .create_message(
            &user,
            &meta(),
            CreateMessagePayload {
                conversation_id: conversation.id,
                text: "Chegaram as entradas?".to_string(),
            },
        )
        .await
        .unwrap();

    // Quem envia já consta como leitor.
    assert_eq!(message.read_by, vec![user.user_id]);

    let read = state
        .message_service
        .mark_read(&admin, message.id)
        .await
        .unwrap();
    assert!(read.read_by.contains(&admin.user_id));

    let again = state
        .message_service
        .mark_read(&admin, message.id)
        .await
        .unwrap();
    assert_eq!(again.read_by.len(), 2);
}
