//! Compute client trait
//!
//! Required methods map one-to-one onto vendor API calls. Everything else
//! (flattening paginated lists, looking resources up by name, waiting for
//! launched instances) is provided on top of them.

use crate::error::{ComputeError, Result};
use crate::instance::{Instance, InstanceStateChange, RunRequest};
use crate::key_pair::KeyPair;
use crate::offering::{OfferingQuery, ReservedInstancesOffering};
use crate::region::{AvailabilityZone, Region};
use crate::security_group::{IpPermission, SecurityGroup};
use crate::sequencer::{Page, Sequencer};
use crate::status::InstanceStatus;
use crate::tag::{Filter, Tag, TagDescription};
use crate::waiter::{WaitConfig, wait_until};
use async_trait::async_trait;

const INSTANCE_NOT_FOUND: &str = "InvalidInstanceID.NotFound";
const KEY_PAIR_NOT_FOUND: &str = "InvalidKeyPair.NotFound";
const GROUP_NOT_FOUND: &str = "InvalidGroup.NotFound";

/// Compute API facade
///
/// Implemented by the AWS backend on top of `aws_sdk_ec2::Client`.
#[async_trait]
pub trait ComputeClient: Send + Sync {
    /// Backend name for logs (e.g. "aws-ec2")
    fn name(&self) -> &str;

    /// Pagination policy used by the list helpers
    fn sequencer(&self) -> Sequencer {
        Sequencer::new()
    }

    // ---- instances ----

    /// One page of DescribeInstances. Empty `ids` means no id filter.
    async fn describe_instances_page(
        &self,
        ids: &[String],
        filters: &[Filter],
        token: Option<String>,
    ) -> Result<Page<Instance>>;

    async fn run_instances(&self, request: &RunRequest) -> Result<Vec<Instance>>;

    async fn start_instances(&self, ids: &[String]) -> Result<Vec<InstanceStateChange>>;

    async fn stop_instances(&self, ids: &[String], force: bool)
    -> Result<Vec<InstanceStateChange>>;

    async fn terminate_instances(&self, ids: &[String]) -> Result<Vec<InstanceStateChange>>;

    async fn reboot_instances(&self, ids: &[String]) -> Result<()>;

    // ---- key pairs ----

    /// DescribeKeyPairs. Empty `names` lists every key pair.
    async fn describe_key_pairs(&self, names: &[String]) -> Result<Vec<KeyPair>>;

    /// Create a key pair; the result carries the private key material
    async fn create_key_pair(&self, name: &str) -> Result<KeyPair>;

    async fn import_key_pair(&self, name: &str, public_key: &[u8]) -> Result<KeyPair>;

    async fn delete_key_pair(&self, name: &str) -> Result<()>;

    // ---- security groups ----

    /// One page of DescribeSecurityGroups. Empty `names` means no name filter.
    async fn describe_security_groups_page(
        &self,
        names: &[String],
        token: Option<String>,
    ) -> Result<Page<SecurityGroup>>;

    /// Returns the new group id
    async fn create_security_group(
        &self,
        name: &str,
        description: &str,
        vpc_id: Option<&str>,
    ) -> Result<String>;

    async fn delete_security_group(&self, group_id: &str) -> Result<()>;

    async fn authorize_ingress(&self, group_id: &str, permission: &IpPermission) -> Result<()>;

    async fn revoke_ingress(&self, group_id: &str, permission: &IpPermission) -> Result<()>;

    // ---- tags ----

    async fn describe_tags_page(
        &self,
        filters: &[Filter],
        token: Option<String>,
    ) -> Result<Page<TagDescription>>;

    async fn create_tags(&self, resource_ids: &[String], tags: &[Tag]) -> Result<()>;

    async fn delete_tags(&self, resource_ids: &[String], tags: &[Tag]) -> Result<()>;

    // ---- statuses / offerings / regions ----

    async fn describe_instance_status_page(
        &self,
        ids: &[String],
        include_all: bool,
        token: Option<String>,
    ) -> Result<Page<InstanceStatus>>;

    async fn describe_reserved_instances_offerings_page(
        &self,
        query: &OfferingQuery,
        token: Option<String>,
    ) -> Result<Page<ReservedInstancesOffering>>;

    async fn describe_regions(&self) -> Result<Vec<Region>>;

    async fn describe_availability_zones(&self) -> Result<Vec<AvailabilityZone>>;

    // ---- provided helpers ----

    /// Every instance, across all pages
    async fn instances(&self) -> Result<Vec<Instance>> {
        self.sequencer()
            .sequence(|token| self.describe_instances_page(&[], &[], token))
            .await
    }

    async fn instances_by_id(&self, ids: &[String]) -> Result<Vec<Instance>> {
        self.instances_matching(ids, &[]).await
    }

    async fn instances_filtered(&self, filters: &[Filter]) -> Result<Vec<Instance>> {
        self.instances_matching(&[], filters).await
    }

    /// Instances matching both the ids and the filters (evaluated by the API)
    async fn instances_matching(&self, ids: &[String], filters: &[Filter]) -> Result<Vec<Instance>> {
        self.sequencer()
            .sequence(|token| self.describe_instances_page(ids, filters, token))
            .await
    }

    /// Look up a single instance; unknown ids yield `None`
    async fn instance(&self, id: &str) -> Result<Option<Instance>> {
        let ids = [id.to_string()];
        let found = not_found_as_none(self.instances_by_id(&ids).await, INSTANCE_NOT_FOUND)?;
        Ok(found.and_then(|list| list.into_iter().find(|i| i.instance_id == id)))
    }

    /// Launch instances and poll until none of them is `pending`
    async fn run_and_wait(&self, request: &RunRequest, wait: &WaitConfig) -> Result<Vec<Instance>> {
        request.validate()?;

        let launched = self.run_instances(request).await?;
        let ids: Vec<String> = launched
            .iter()
            .map(|i| i.instance_id.clone())
            .filter(|id| !id.is_empty())
            .collect();

        if ids.is_empty() {
            return Ok(launched);
        }

        tracing::info!(
            "[{}] Launched {} instance(s), waiting for them to leave pending",
            self.name(),
            ids.len()
        );
        self.wait_until_not_pending(&ids, wait).await
    }

    /// Poll DescribeInstances until every id is visible and not `pending`
    ///
    /// Freshly launched ids may be reported as unknown for a while; that
    /// counts as not settled yet.
    async fn wait_until_not_pending(
        &self,
        ids: &[String],
        wait: &WaitConfig,
    ) -> Result<Vec<Instance>> {
        wait_until(
            wait,
            move || async move {
                let found = not_found_as_none(self.instances_by_id(ids).await, INSTANCE_NOT_FOUND)?;
                if found.is_none() {
                    tracing::debug!("[{}] Launched instances not visible yet", self.name());
                }
                Ok::<_, ComputeError>(found.unwrap_or_default())
            },
            |instances: &Vec<Instance>| {
                ids.iter().all(|id| {
                    instances
                        .iter()
                        .any(|i| &i.instance_id == id && !i.is_pending())
                })
            },
        )
        .await
    }

    async fn key_pairs(&self) -> Result<Vec<KeyPair>> {
        self.describe_key_pairs(&[]).await
    }

    async fn key_pair(&self, name: &str) -> Result<Option<KeyPair>> {
        let names = [name.to_string()];
        let found = not_found_as_none(self.describe_key_pairs(&names).await, KEY_PAIR_NOT_FOUND)?;
        Ok(found.and_then(|list| list.into_iter().find(|k| k.name == name)))
    }

    async fn security_groups(&self) -> Result<Vec<SecurityGroup>> {
        self.sequencer()
            .sequence(|token| self.describe_security_groups_page(&[], token))
            .await
    }

    async fn security_group(&self, name: &str) -> Result<Option<SecurityGroup>> {
        let names = [name.to_string()];
        let found = not_found_as_none(
            self.sequencer()
                .sequence(|token| self.describe_security_groups_page(&names, token))
                .await,
            GROUP_NOT_FOUND,
        )?;
        Ok(found.and_then(|list| list.into_iter().find(|g| g.group_name == name)))
    }

    /// Resolve a group by name and delete it
    async fn delete_security_group_by_name(&self, name: &str) -> Result<()> {
        let group = self
            .security_group(name)
            .await?
            .ok_or_else(|| ComputeError::SecurityGroupNotFound(name.to_string()))?;
        self.delete_security_group(&group.group_id).await
    }

    async fn tags(&self, filters: &[Filter]) -> Result<Vec<TagDescription>> {
        self.sequencer()
            .sequence(|token| self.describe_tags_page(filters, token))
            .await
    }

    async fn instance_statuses(
        &self,
        ids: &[String],
        include_all: bool,
    ) -> Result<Vec<InstanceStatus>> {
        self.sequencer()
            .sequence(|token| self.describe_instance_status_page(ids, include_all, token))
            .await
    }

    async fn reserved_instances_offerings(
        &self,
        query: &OfferingQuery,
    ) -> Result<Vec<ReservedInstancesOffering>> {
        self.sequencer()
            .sequence(|token| self.describe_reserved_instances_offerings_page(query, token))
            .await
    }
}

/// Treat the given vendor "not found" error code as an absent result
fn not_found_as_none<T>(result: Result<T>, code: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.code() == Some(code) => Ok(None),
        Err(e) => Err(e),
    }
}
